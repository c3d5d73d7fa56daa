//! Error types for tag parsing, validation and field mutation.
//!
//! Parsing is fail-fast: the first problem found while walking a record's
//! fields (in declaration order) aborts the whole call and no partial result
//! list is returned.
//!
//! ## Error Categories
//!
//! - **Target errors**: the value handed to the parser is not a record
//! - **Settings errors**: the configured delimiters cannot split anything
//! - **Field errors**: a field's annotation failed lexing or validation, see [`FieldError`]
//! - **Mutation errors**: a value write-back was refused
//! - **Processor errors**: the user callback rejected a field
//!
//! ## Examples
//!
//! ```rust
//! use fieldtags::{ErrorKind, Key, Record, TagSettings};
//!
//! #[derive(Record)]
//! struct Person {
//!     #[tags(validator = "min")]
//!     pub age: u32,
//! }
//!
//! let settings = TagSettings::new("validator").with_key(Key::value("min"));
//! let err = settings.parse_struct(&mut Person { age: 3 }).unwrap_err();
//!
//! assert_eq!(err.kind(), ErrorKind::MissingValue);
//! assert_eq!(err.to_string(), "field 'age': key 'min' requires a value");
//! ```

use crate::Kind;
use thiserror::Error;

/// Boxed error returned by validators and processors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents all errors surfaced by [`TagSettings`](crate::TagSettings) and [`Field`](crate::Field).
#[derive(Debug, Error)]
pub enum Error {
    /// The parse target did not resolve to a record
    #[error("parse target must be a present record")]
    InvalidTarget,

    /// Separator or equals delimiter cannot be used for splitting
    #[error("invalid tag settings: {0}")]
    InvalidSettings(String),

    /// A field's annotation failed lexing or validation
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: FieldError,
    },

    /// The field was reached through a shared reference or has no value slot
    #[error("field '{field}': cannot be changed")]
    NotSettable { field: String },

    /// The written value does not have the field's exact type
    #[error("field '{field}': cannot apply value of type {found} to {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The processor callback failed for a field
    #[error("field '{field}': processor failed: {source}")]
    ProcessorFailed {
        field: String,
        #[source]
        source: BoxError,
    },
}

/// Lexing and validation failures for a single field's annotation.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("annotation is present but empty")]
    EmptyAnnotation,

    #[error("key '{key}' does not exist")]
    UnknownKey { key: String },

    #[error("key '{key}' does not take a value, got '{value}'")]
    UnexpectedValue { key: String, value: String },

    #[error("key '{key}' requires a value")]
    MissingValue { key: String },

    #[error("key '{key}' cannot be used on a field of kind {kind}")]
    KindNotAllowed { key: String, kind: Kind },

    #[error("key '{key}' rejected value '{value}': {source}")]
    ValidatorRejected {
        key: String,
        value: String,
        #[source]
        source: BoxError,
    },

    #[error("key '{key}' is required but not found")]
    MissingRequiredKey { key: String },
}

/// Flat discriminant over [`Error`] and [`FieldError`].
///
/// Lets callers branch on the failure without matching nested enums.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidTarget,
    InvalidSettings,
    EmptyAnnotation,
    UnknownKey,
    UnexpectedValue,
    MissingValue,
    KindNotAllowed,
    ValidatorRejected,
    MissingRequiredKey,
    NotSettable,
    TypeMismatch,
    ProcessorFailed,
}

impl Error {
    /// Wraps a field-level failure with the name of the field it belongs to.
    pub fn field(field: &str, source: FieldError) -> Self {
        Error::Field {
            field: field.to_string(),
            source,
        }
    }

    /// Returns the kind of failure, looking through [`Error::Field`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTarget => ErrorKind::InvalidTarget,
            Error::InvalidSettings(_) => ErrorKind::InvalidSettings,
            Error::Field { source, .. } => source.kind(),
            Error::NotSettable { .. } => ErrorKind::NotSettable,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::ProcessorFailed { .. } => ErrorKind::ProcessorFailed,
        }
    }

    /// Name of the field the error is attached to, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Error::InvalidTarget | Error::InvalidSettings(_) => None,
            Error::Field { field, .. }
            | Error::NotSettable { field }
            | Error::TypeMismatch { field, .. }
            | Error::ProcessorFailed { field, .. } => Some(field.as_str()),
        }
    }
}

impl FieldError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::EmptyAnnotation => ErrorKind::EmptyAnnotation,
            FieldError::UnknownKey { .. } => ErrorKind::UnknownKey,
            FieldError::UnexpectedValue { .. } => ErrorKind::UnexpectedValue,
            FieldError::MissingValue { .. } => ErrorKind::MissingValue,
            FieldError::KindNotAllowed { .. } => ErrorKind::KindNotAllowed,
            FieldError::ValidatorRejected { .. } => ErrorKind::ValidatorRejected,
            FieldError::MissingRequiredKey { .. } => ErrorKind::MissingRequiredKey,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
