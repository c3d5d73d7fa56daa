//! Parsed fields.
//!
//! A [`Field`] is what [`TagSettings::parse_struct`](crate::TagSettings::parse_struct)
//! returns for every selected struct field: its name, [`Kind`], parsed
//! [`Tag`]s and a live alias into the record's storage. Writing through
//! [`Field::set_value`] changes the caller's record in place.
//!
//! ```rust
//! use fieldtags::{Key, Record, TagSettings};
//!
//! #[derive(Record)]
//! struct Person {
//!     #[tags(validator = "required;max:32")]
//!     pub name: String,
//! }
//!
//! let settings = TagSettings::new("validator")
//!     .with_key(Key::flag("required"))
//!     .with_key(Key::value("max"));
//!
//! let mut person = Person { name: "ann".to_string() };
//! let mut fields = settings.parse_struct(&mut person).unwrap();
//!
//! let name = &mut fields[0];
//! assert_eq!(name.key_value("max"), Some("32"));
//! assert!(name.set_value(42_u32).is_err());
//! name.set_value("ANN".to_string()).unwrap();
//!
//! drop(fields);
//! assert_eq!(person.name, "ANN");
//! ```

use crate::error::{Error, Result};
use crate::record::{FieldDescriptor, Slot};
use crate::{Kind, Tag};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::any::{Any, TypeId};

/// One struct field's extracted record.
#[derive(Debug)]
pub struct Field<'a> {
    name: &'a str,
    kind: Kind,
    type_name: &'static str,
    tags: Vec<Tag>,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub(crate) fn new(descriptor: FieldDescriptor<'a>, tags: Vec<Tag>) -> Self {
        Field {
            name: descriptor.name,
            kind: descriptor.kind,
            type_name: descriptor.type_name,
            tags,
            slot: descriptor.slot,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Rust type name of the field, e.g. `alloc::string::String`.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Tokens in annotation order; empty for untagged fields.
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Value of the first token with `key`, `None` if the key is absent.
    #[must_use]
    pub fn key_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.key_value(key).is_some()
    }

    /// Every token rendered with `equals`, e.g. `["required", "gt=10"]`.
    #[must_use]
    pub fn tags_formatted(&self, equals: &str) -> Vec<String> {
        self.tags.iter().map(|tag| tag.format_with(equals)).collect()
    }

    /// Tokens as an ordered map; a repeated key keeps its last value.
    #[must_use]
    pub fn tag_map(&self) -> IndexMap<&str, &str> {
        self.tags
            .iter()
            .map(|tag| (tag.key.as_str(), tag.value.as_str()))
            .collect()
    }

    /// The field value, if the record exposes it.
    #[must_use]
    pub fn value_any(&self) -> Option<&dyn Any> {
        self.slot.get()
    }

    /// The field value as `T`, `None` if the type differs.
    #[must_use]
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.slot.get().and_then(|value| value.downcast_ref::<T>())
    }

    /// Mutable access to the field value as `T`.
    pub fn value_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.slot
            .get_mut()
            .and_then(|value| value.downcast_mut::<T>())
    }

    /// Returns `true` if the field's type is exactly `T`.
    #[must_use]
    pub fn has_type<T: Any>(&self) -> bool {
        self.slot.value_type_id() == Some(TypeId::of::<T>())
    }

    /// Returns `true` if [`Field::set_value`] can write to the record.
    #[must_use]
    pub fn is_settable(&self) -> bool {
        matches!(self.slot, Slot::Mut(_))
    }

    /// Writes `value` into the record.
    ///
    /// # Errors
    ///
    /// - [`Error::NotSettable`] if the record was parsed through a shared reference.
    /// - [`Error::TypeMismatch`] if `T` is not exactly the field's type; the
    ///   record is left unchanged.
    pub fn set_value<T: Any>(&mut self, value: T) -> Result<()> {
        let field = self.name;
        let expected = self.type_name;

        let Some(slot) = self.slot.get_mut() else {
            return Err(Error::NotSettable {
                field: field.to_string(),
            });
        };

        match slot.downcast_mut::<T>() {
            Some(target) => {
                *target = value;
                Ok(())
            }
            None => Err(Error::TypeMismatch {
                field: field.to_string(),
                expected,
                found: std::any::type_name::<T>(),
            }),
        }
    }
}

impl Serialize for Field<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Field", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("tags", &self.tags)?;
        state.end()
    }
}
