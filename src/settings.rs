//! Tag settings: the key schema plus the parse pipeline.
//!
//! [`TagSettings`] names the annotation to read, the delimiters of its
//! micro-language, the recognized [`Key`]s and a few behavior flags. It is
//! built once and reused for any number of records:
//!
//! ```rust
//! use fieldtags::{Key, Record, TagSettings};
//!
//! #[derive(Record)]
//! struct MyData {
//!     #[tags(validator = "required")]
//!     pub name: String,
//!     #[tags(validator = "gt:10;lt:130")]
//!     pub age: u32,
//!     #[tags(validator = "eq:Latvia")]
//!     pub country: String,
//!     pub postal: String,
//! }
//!
//! let settings = TagSettings::new("validator").with_keys([
//!     Key::flag("required"),
//!     Key::value("eq"),
//!     Key::value("gt"),
//!     Key::value("lt"),
//! ]);
//!
//! let mut data = MyData {
//!     name: "John".to_string(),
//!     age: 22,
//!     country: "Latvia".to_string(),
//!     postal: String::new(),
//! };
//!
//! let fields = settings.parse_struct(&mut data).unwrap();
//! let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["name", "age", "country"]);
//! assert_eq!(fields[1].tags_formatted("="), ["gt=10", "lt=130"]);
//! ```
//!
//! Parsing stops at the first error: no partial list of fields is returned.

use crate::error::{BoxError, Error, FieldError, Result};
use crate::lexer;
use crate::record::{FieldDescriptor, Record, Target};
use crate::{Field, Key, Kind, Tag};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Default separator between keys, as in `required;gt:10`.
pub const DEFAULT_SEPARATOR: &str = ";";

/// Default delimiter between a key and its value, as in `gt:10`.
pub const DEFAULT_EQUALS: &str = ":";

/// Post-processes every parsed field; runs after validation succeeded for all fields.
pub type Processor = Arc<dyn Fn(&mut Field<'_>) -> std::result::Result<(), BoxError> + Send + Sync>;

/// Parse configuration for one annotation name.
#[derive(Clone)]
pub struct TagSettings {
    name: String,
    separator: String,
    equals: String,
    keys: Vec<Key>,
    processor: Option<Processor>,
    include_untagged: bool,
    key_validation_disabled: bool,
    key_value_disabled: bool,
    required_keys: Vec<String>,
}

impl TagSettings {
    /// Creates settings reading the annotation `name` with the default
    /// separator (`;`) and equals (`:`), no keys and no processor.
    ///
    /// ```rust
    /// use fieldtags::TagSettings;
    ///
    /// let settings = TagSettings::new("validator");
    /// assert_eq!(settings.separator(), ";");
    /// assert_eq!(settings.equals(), ":");
    /// assert!(!settings.includes_untagged());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        TagSettings {
            name: name.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
            equals: DEFAULT_EQUALS.to_string(),
            keys: Vec::new(),
            processor: None,
            include_untagged: false,
            key_validation_disabled: false,
            key_value_disabled: false,
            required_keys: Vec::new(),
        }
    }

    /// Creates fully specified settings in one call.
    #[must_use]
    pub fn with_options(
        name: impl Into<String>,
        separator: impl Into<String>,
        equals: impl Into<String>,
        processor: Option<Processor>,
        include_untagged: bool,
        keys: impl IntoIterator<Item = Key>,
    ) -> Self {
        let mut settings = TagSettings::new(name).with_custom_separators(separator, equals);
        settings.processor = processor;
        settings.include_untagged = include_untagged;
        settings.add_keys(keys);
        settings
    }

    /// Creates settings with the default delimiters, an optional processor and `keys`.
    #[must_use]
    pub fn with_defaults(
        name: impl Into<String>,
        processor: Option<Processor>,
        keys: impl IntoIterator<Item = Key>,
    ) -> Self {
        TagSettings::with_options(
            name,
            DEFAULT_SEPARATOR,
            DEFAULT_EQUALS,
            processor,
            false,
            keys,
        )
    }

    /// Sets the key separator and the key/value delimiter, and turns
    /// key/value logic back on.
    #[must_use]
    pub fn with_custom_separators(
        mut self,
        separator: impl Into<String>,
        equals: impl Into<String>,
    ) -> Self {
        self.separator = separator.into();
        self.equals = equals.into();
        self.key_value_disabled = false;
        self
    }

    /// Accepts tokens whose key is not registered, without running any validator on them.
    #[must_use]
    pub fn with_no_key_validation(mut self) -> Self {
        self.key_validation_disabled = true;
        self
    }

    /// Treats every segment as a bare value with an empty key, as in
    /// `#[tags(my_tag = "my_value")]`.
    #[must_use]
    pub fn with_no_key_value_logic(mut self) -> Self {
        self.key_value_disabled = true;
        self
    }

    /// Sets the field processor.
    #[must_use]
    pub fn with_processor<F>(mut self, processor: F) -> Self
    where
        F: Fn(&mut Field<'_>) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
    {
        self.processor = Some(Arc::new(processor));
        self
    }

    /// Includes exported fields without the annotation, with no tags.
    #[must_use]
    pub fn include_untagged_fields(mut self) -> Self {
        self.include_untagged = true;
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        self.add_key(key);
        self
    }

    #[must_use]
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.add_keys(keys);
        self
    }

    /// Registers a key. Duplicates are not checked; the first registered wins on lookup.
    pub fn add_key(&mut self, key: Key) -> &mut Self {
        if key.is_required() {
            self.required_keys.push(key.name().to_string());
        }
        self.keys.push(key);
        self
    }

    pub fn add_keys(&mut self, keys: impl IntoIterator<Item = Key>) -> &mut Self {
        for key in keys {
            self.add_key(key);
        }
        self
    }

    /// Removes every key named `name`. Returns `true` if any was removed.
    pub fn remove_key(&mut self, name: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|key| key.name() != name);
        self.refresh_required_keys();
        self.keys.len() != before
    }

    fn refresh_required_keys(&mut self) {
        self.required_keys = self
            .keys
            .iter()
            .filter(|key| key.is_required())
            .map(|key| key.name().to_string())
            .collect();
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    #[inline]
    #[must_use]
    pub fn equals(&self) -> &str {
        &self.equals
    }

    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Names of the required keys, in registration order.
    #[inline]
    #[must_use]
    pub fn required_keys(&self) -> &[String] {
        &self.required_keys
    }

    #[inline]
    #[must_use]
    pub fn has_processor(&self) -> bool {
        self.processor.is_some()
    }

    #[inline]
    #[must_use]
    pub fn includes_untagged(&self) -> bool {
        self.include_untagged
    }

    #[inline]
    #[must_use]
    pub fn is_key_validation_disabled(&self) -> bool {
        self.key_validation_disabled
    }

    #[inline]
    #[must_use]
    pub fn is_key_value_disabled(&self) -> bool {
        self.key_value_disabled
    }

    /// First registered key named `name`.
    #[must_use]
    pub fn find_key(&self, name: &str) -> Option<&Key> {
        self.keys.iter().find(|key| key.name() == name)
    }

    /// Parses and validates the tagged fields of `target`, then runs the processor.
    ///
    /// Fields come back in declaration order and can write to `target`
    /// through [`Field::set_value`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTarget`] if `target` holds no record.
    /// - [`Error::InvalidSettings`] if the delimiters are empty.
    /// - [`Error::Field`] for the first field whose annotation is invalid.
    /// - [`Error::ProcessorFailed`] for the first field the processor rejects.
    #[tracing::instrument(level = "debug", skip_all, fields(tag = %self.name))]
    pub fn parse_struct<'r, T>(&self, target: &'r mut T) -> Result<Vec<Field<'r>>>
    where
        T: Target + ?Sized,
    {
        lexer::check_delimiters(self)?;
        let record: &'r mut dyn Record = target.record_mut().ok_or(Error::InvalidTarget)?;
        let mut fields = self.parse_fields(record.fields_mut())?;
        self.run_processor(&mut fields)?;
        Ok(fields)
    }

    /// Like [`TagSettings::parse_struct`] for a shared borrow; the returned
    /// fields are not settable.
    ///
    /// # Errors
    ///
    /// Same as [`TagSettings::parse_struct`].
    #[tracing::instrument(level = "debug", skip_all, fields(tag = %self.name))]
    pub fn parse_struct_ref<'r, T>(&self, target: &'r T) -> Result<Vec<Field<'r>>>
    where
        T: Target + ?Sized,
    {
        lexer::check_delimiters(self)?;
        let record: &'r dyn Record = target.record().ok_or(Error::InvalidTarget)?;
        let mut fields = self.parse_fields(record.fields())?;
        self.run_processor(&mut fields)?;
        Ok(fields)
    }

    fn parse_fields<'a>(&self, descriptors: Vec<FieldDescriptor<'a>>) -> Result<Vec<Field<'a>>> {
        let mut fields = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if !descriptor.exported {
                trace!(field = descriptor.name, "skipping unexported field");
                continue;
            }

            let tags = match descriptor.annotations.lookup(&self.name) {
                Some(raw) => self
                    .parse_tags(raw, descriptor.kind)
                    .map_err(|source| Error::field(descriptor.name, source))?,
                None if self.include_untagged => Vec::new(),
                None => {
                    trace!(field = descriptor.name, "skipping untagged field");
                    continue;
                }
            };

            fields.push(Field::new(descriptor, tags));
        }

        Ok(fields)
    }

    fn parse_tags(&self, raw: &str, kind: Kind) -> std::result::Result<Vec<Tag>, FieldError> {
        let tags = lexer::split(raw, self)?;
        self.validate_tags(&tags, kind)?;
        Ok(tags)
    }

    /// Validates one field's tokens: every key must be known and well formed,
    /// and every required key must be present.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldError`] found, in token order, then in
    /// required-key order.
    pub fn validate_tags(&self, tags: &[Tag], kind: Kind) -> std::result::Result<(), FieldError> {
        for tag in tags {
            match self.find_key(&tag.key) {
                Some(key) => tag.validate(key, kind)?,
                None if self.key_validation_disabled => continue,
                None => {
                    return Err(FieldError::UnknownKey {
                        key: tag.key.clone(),
                    })
                }
            }
        }

        for required in &self.required_keys {
            if !tags.iter().any(|tag| &tag.key == required) {
                return Err(FieldError::MissingRequiredKey {
                    key: required.clone(),
                });
            }
        }

        Ok(())
    }

    fn run_processor(&self, fields: &mut [Field<'_>]) -> Result<()> {
        let Some(processor) = &self.processor else {
            return Ok(());
        };

        for field in fields.iter_mut() {
            processor(&mut *field).map_err(|source| Error::ProcessorFailed {
                field: field.name().to_string(),
                source,
            })?;
        }

        Ok(())
    }
}

impl fmt::Debug for TagSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagSettings")
            .field("name", &self.name)
            .field("separator", &self.separator)
            .field("equals", &self.equals)
            .field("keys", &self.keys)
            .field("processor", &self.processor.as_ref().map(|_| "<fn>"))
            .field("include_untagged", &self.include_untagged)
            .field("key_validation_disabled", &self.key_validation_disabled)
            .field("key_value_disabled", &self.key_value_disabled)
            .field("required_keys", &self.required_keys)
            .finish()
    }
}
