//! Recognized annotation keys.
//!
//! A [`Key`] describes one keyword the schema accepts inside an annotation:
//! whether it is a flag (`required`) or takes a value (`gt:10`), whether every
//! annotated field must carry it, which field kinds it may be used on, and an
//! optional validator for its value.
//!
//! ```rust
//! use fieldtags::{Key, Kind};
//!
//! let required = Key::flag("required");
//! let min = Key::value("min")
//!     .with_allowed_kinds([Kind::U32, Kind::I32])
//!     .with_validator(|v| v.parse::<i64>().map(|_| ()).map_err(Into::into));
//!
//! assert!(required.is_bool());
//! assert!(!min.is_bool());
//! assert!(min.validate_value("10").is_ok());
//! assert!(min.validate_value("ten").is_err());
//! ```

use crate::error::BoxError;
use crate::Kind;
use std::fmt;
use std::sync::Arc;

/// Validates the value of a key. Boolean keys are validated with `""`.
pub type Validator = Arc<dyn Fn(&str) -> Result<(), BoxError> + Send + Sync>;

/// Schema entry for one recognized annotation keyword.
#[derive(Clone)]
pub struct Key {
    name: String,
    is_bool: bool,
    is_required: bool,
    allowed_kinds: Vec<Kind>,
    validator: Option<Validator>,
}

impl Key {
    /// Creates a key.
    ///
    /// - `is_bool`: the key is a flag and takes no value.
    /// - `is_required`: every field carrying the annotation must use this key.
    #[must_use]
    pub fn new(name: impl Into<String>, is_bool: bool, is_required: bool) -> Self {
        Key {
            name: name.into(),
            is_bool,
            is_required,
            allowed_kinds: Vec::new(),
            validator: None,
        }
    }

    /// Creates an optional flag key, e.g. `required`.
    #[must_use]
    pub fn flag(name: impl Into<String>) -> Self {
        Key::new(name, true, false)
    }

    /// Creates an optional key that takes a value, e.g. `gt:10`.
    #[must_use]
    pub fn value(name: impl Into<String>) -> Self {
        Key::new(name, false, false)
    }

    /// Marks the key as required on every annotated field.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Sets the value validator.
    #[must_use]
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Restricts the key to fields of the given kinds.
    #[must_use]
    pub fn with_allowed_kinds(mut self, kinds: impl IntoIterator<Item = Kind>) -> Self {
        self.allowed_kinds.extend(kinds);
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.is_bool
    }

    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Kinds the key is restricted to; empty means any kind.
    #[inline]
    #[must_use]
    pub fn allowed_kinds(&self) -> &[Kind] {
        &self.allowed_kinds
    }

    #[inline]
    #[must_use]
    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Returns `true` if the key may be used on a field of `kind`.
    #[must_use]
    pub fn allows_kind(&self, kind: Kind) -> bool {
        self.allowed_kinds.is_empty() || self.allowed_kinds.contains(&kind)
    }

    /// Runs the validator, if any, on `value`.
    ///
    /// # Errors
    ///
    /// Returns whatever the validator returns.
    pub fn validate_value(&self, value: &str) -> Result<(), BoxError> {
        match &self.validator {
            Some(validator) => validator(value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("is_bool", &self.is_bool)
            .field("is_required", &self.is_required)
            .field("allowed_kinds", &self.allowed_kinds)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bool_key() {
        let key = Key::new("boolKey", true, true).with_allowed_kinds([Kind::Bool]);
        assert_eq!(key.name(), "boolKey");
        assert!(key.is_bool());
        assert!(key.is_required());
        assert_eq!(key.allowed_kinds(), &[Kind::Bool]);
        assert!(!key.has_validator());
    }

    #[test]
    fn test_new_value_key_with_validator() {
        let key = Key::value("stringKey").with_validator(|_| Ok(()));
        assert_eq!(key.name(), "stringKey");
        assert!(!key.is_bool());
        assert!(!key.is_required());
        assert!(key.allowed_kinds().is_empty());
        assert!(key.has_validator());
    }

    #[test]
    fn test_allows_kind() {
        let any = Key::flag("omitempty");
        assert!(any.allows_kind(Kind::Struct));

        let numeric = Key::value("gt").with_allowed_kinds([Kind::I32, Kind::U32]);
        assert!(numeric.allows_kind(Kind::U32));
        assert!(!numeric.allows_kind(Kind::String));
    }

    #[test]
    fn test_validator_receives_value() {
        let key = Key::value("len").with_validator(|v| {
            if v.len() > 3 {
                return Err(format!("'{}' is too long", v).into());
            }
            Ok(())
        });
        assert!(key.validate_value("abc").is_ok());
        let err = key.validate_value("abcd").unwrap_err();
        assert_eq!(err.to_string(), "'abcd' is too long");
    }

    #[test]
    fn test_debug_hides_validator() {
        let key = Key::flag("required").required().with_validator(|_| Ok(()));
        let debug = format!("{:?}", key);
        assert!(debug.contains("\"required\""));
        assert!(debug.contains("<fn>"));
    }
}
