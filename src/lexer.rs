//! Splitting raw annotation strings into [`Tag`] tokens.
//!
//! Separators are plain substrings; there is no escaping, so a value can never
//! contain the configured separator. The equals delimiter splits only once, so
//! values may contain it.

use crate::error::{Error, FieldError, Result};
use crate::{Tag, TagSettings};

/// Splits `raw` into tokens according to `settings`.
///
/// ```rust
/// use fieldtags::{lexer, Tag, TagSettings};
///
/// let settings = TagSettings::new("validator").with_custom_separators(";", "=");
/// let tags = lexer::split("k1=v1;k2", &settings).unwrap();
/// assert_eq!(tags, vec![Tag::new("k1", "v1"), Tag::new("k2", "")]);
/// ```
///
/// # Errors
///
/// Returns [`FieldError::EmptyAnnotation`] when `raw` is empty.
pub fn split(raw: &str, settings: &TagSettings) -> std::result::Result<Vec<Tag>, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::EmptyAnnotation);
    }

    let segments = raw.split(settings.separator());
    let tags = if settings.is_key_value_disabled() {
        segments.map(Tag::from_value).collect()
    } else {
        segments
            .map(|segment| Tag::from_segment(segment, settings.equals()))
            .collect()
    };

    Ok(tags)
}

/// Checks that the delimiters can split anything at all.
pub(crate) fn check_delimiters(settings: &TagSettings) -> Result<()> {
    if settings.separator().is_empty() {
        return Err(Error::InvalidSettings("separator is empty".to_string()));
    }
    if !settings.is_key_value_disabled() && settings.equals().is_empty() {
        return Err(Error::InvalidSettings("equals delimiter is empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn settings() -> TagSettings {
        TagSettings::new("testtag")
    }

    #[test]
    fn test_default_delimiters() {
        let tags = split("required;gt:10;lt:130", &settings()).unwrap();
        assert_eq!(
            tags,
            vec![
                Tag::new("required", ""),
                Tag::new("gt", "10"),
                Tag::new("lt", "130"),
            ]
        );
    }

    #[test]
    fn test_empty_annotation() {
        let err = split("", &settings()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyAnnotation);
    }

    #[test]
    fn test_consecutive_separators_yield_empty_token() {
        let tags = split("a;;b", &settings()).unwrap();
        assert_eq!(tags, vec![Tag::new("a", ""), Tag::new("", ""), Tag::new("b", "")]);
    }

    #[test]
    fn test_value_keeps_equals() {
        let tags = split("eq:12:30", &settings()).unwrap();
        assert_eq!(tags, vec![Tag::new("eq", "12:30")]);
    }

    #[test]
    fn test_key_value_disabled() {
        let settings = settings().with_no_key_value_logic();
        let tags = split("first:1;second", &settings).unwrap();
        assert_eq!(tags, vec![Tag::new("", "first:1"), Tag::new("", "second")]);
    }

    #[test]
    fn test_custom_separators() {
        let settings = settings().with_custom_separators(",", "=");
        let tags = split("min=2,max=255", &settings).unwrap();
        assert_eq!(tags, vec![Tag::new("min", "2"), Tag::new("max", "255")]);
    }

    #[test]
    fn test_check_delimiters() {
        assert!(check_delimiters(&settings()).is_ok());

        let err = check_delimiters(&settings().with_custom_separators("", "=")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSettings);

        let err = check_delimiters(&settings().with_custom_separators(",", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSettings);

        let value_only = settings()
            .with_custom_separators(",", "")
            .with_no_key_value_logic();
        assert!(check_delimiters(&value_only).is_ok());
    }
}
