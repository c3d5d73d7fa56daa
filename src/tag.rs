//! Parsed key/value tokens.

use crate::error::FieldError;
use crate::{Key, Kind};
use serde::{Deserialize, Serialize};

/// One key/value pair decoded from an annotation string.
///
/// `key` is empty when key/value logic is disabled; `value` is empty for flag
/// keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Splits a segment on the first `equals`; the remainder is the value verbatim.
    #[must_use]
    pub fn from_segment(segment: &str, equals: &str) -> Self {
        match segment.split_once(equals) {
            Some((key, value)) => Tag::new(key, value),
            None => Tag::new(segment, ""),
        }
    }

    /// A key-less token holding `value`.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Tag::new("", value)
    }

    /// Joins key and value with `equals`, e.g. `gt:10`. Flags render as the bare key.
    ///
    /// ```rust
    /// use fieldtags::Tag;
    ///
    /// assert_eq!(Tag::new("gt", "10").format_with("="), "gt=10");
    /// assert_eq!(Tag::new("required", "").format_with("="), "required");
    /// ```
    #[must_use]
    pub fn format_with(&self, equals: &str) -> String {
        if self.value.is_empty() {
            return self.key.clone();
        }
        format!("{}{}{}", self.key, equals, self.value)
    }

    /// Checks this token against its schema entry: arity, field kind, then the validator.
    pub(crate) fn validate(&self, key: &Key, kind: Kind) -> Result<(), FieldError> {
        if key.is_bool() && !self.value.is_empty() {
            return Err(FieldError::UnexpectedValue {
                key: self.key.clone(),
                value: self.value.clone(),
            });
        }
        if !key.is_bool() && self.value.is_empty() {
            return Err(FieldError::MissingValue {
                key: self.key.clone(),
            });
        }
        if !key.allows_kind(kind) {
            return Err(FieldError::KindNotAllowed {
                key: self.key.clone(),
                kind,
            });
        }

        key.validate_value(&self.value)
            .map_err(|source| FieldError::ValidatorRejected {
                key: self.key.clone(),
                value: self.value.clone(),
                source,
            })
    }
}
