//! Record descriptors: the field metadata the parser walks.
//!
//! Rust has no runtime struct reflection, so a record describes itself by
//! implementing [`Record`]: an ordered list of [`FieldDescriptor`]s carrying
//! each field's name, [`Kind`], visibility, annotations and a value [`Slot`].
//! `#[derive(Record)]` writes this for structs; the trait can also be
//! implemented by hand for dynamically shaped records.
//!
//! ## Manual implementation
//!
//! ```rust
//! use fieldtags::{Annotations, FieldDescriptor, Record, TagSettings, Target, Key};
//!
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! const NAME_TAGS: Annotations<'static> = Annotations::new(&[("validator", "required")]);
//!
//! impl Record for User {
//!     fn fields_mut(&mut self) -> Vec<FieldDescriptor<'_>> {
//!         vec![
//!             FieldDescriptor::new_mut("name", &mut self.name, NAME_TAGS),
//!             FieldDescriptor::new_mut("age", &mut self.age, Annotations::EMPTY),
//!         ]
//!     }
//!
//!     fn fields(&self) -> Vec<FieldDescriptor<'_>> {
//!         vec![
//!             FieldDescriptor::new_ref("name", &self.name, NAME_TAGS),
//!             FieldDescriptor::new_ref("age", &self.age, Annotations::EMPTY),
//!         ]
//!     }
//! }
//!
//! impl Target for User {
//!     fn record_mut(&mut self) -> Option<&mut dyn Record> {
//!         Some(self)
//!     }
//!
//!     fn record(&self) -> Option<&dyn Record> {
//!         Some(self)
//!     }
//! }
//!
//! let settings = TagSettings::new("validator").with_key(Key::flag("required"));
//! let mut user = User { name: "Ann".to_string(), age: 30 };
//! let fields = settings.parse_struct(&mut user).unwrap();
//! assert_eq!(fields.len(), 1);
//! assert_eq!(fields[0].name(), "name");
//! ```

use crate::{HasKind, Kind};
use std::any::{Any, TypeId};
use std::fmt;

/// A record whose fields can be enumerated in declaration order.
pub trait Record {
    /// Describes the fields with mutable value slots.
    fn fields_mut(&mut self) -> Vec<FieldDescriptor<'_>>;

    /// Describes the fields with read-only value slots.
    fn fields(&self) -> Vec<FieldDescriptor<'_>>;
}

/// Something that may lead to a [`Record`] through wrappers.
///
/// Implemented for records (by the derive), and for `Option`, `Box` and
/// references around a target. A missing record at the bottom makes parsing
/// fail with [`Error::InvalidTarget`](crate::Error::InvalidTarget).
pub trait Target {
    fn record_mut(&mut self) -> Option<&mut dyn Record>;

    fn record(&self) -> Option<&dyn Record>;
}

impl<'r> Target for dyn Record + 'r {
    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        Some(self)
    }

    fn record(&self) -> Option<&dyn Record> {
        Some(self)
    }
}

impl<T: Target + ?Sized> Target for Box<T> {
    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        (**self).record_mut()
    }

    fn record(&self) -> Option<&dyn Record> {
        (**self).record()
    }
}

impl<T: Target> Target for Option<T> {
    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        self.as_mut().and_then(|inner| inner.record_mut())
    }

    fn record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(|inner| inner.record())
    }
}

impl<T: Target + ?Sized> Target for &mut T {
    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        (**self).record_mut()
    }

    fn record(&self) -> Option<&dyn Record> {
        (**self).record()
    }
}

/// Annotations attached to a field: `(name, content)` pairs in declaration order.
///
/// ```rust
/// use fieldtags::Annotations;
///
/// let annotations = Annotations::new(&[("json", "name"), ("validator", "required")]);
/// assert_eq!(annotations.lookup("validator"), Some("required"));
/// assert_eq!(annotations.lookup("xml"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Annotations<'a> {
    entries: &'a [(&'a str, &'a str)],
}

impl Annotations<'static> {
    pub const EMPTY: Annotations<'static> = Annotations { entries: &[] };
}

impl<'a> Annotations<'a> {
    #[must_use]
    pub const fn new(entries: &'a [(&'a str, &'a str)]) -> Self {
        Annotations { entries }
    }

    /// Content of the first annotation named `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, content)| *content)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.entries.iter().copied()
    }
}

/// Access to a field's storage.
pub enum Slot<'a> {
    /// Writable alias into the record.
    Mut(&'a mut dyn Any),
    /// Read-only alias into the record.
    Ref(&'a dyn Any),
    /// The field's value is not exposed.
    Opaque,
}

impl<'a> Slot<'a> {
    #[must_use]
    pub fn get(&self) -> Option<&dyn Any> {
        match self {
            Slot::Mut(value) => Some(&**value),
            Slot::Ref(value) => Some(*value),
            Slot::Opaque => None,
        }
    }

    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut dyn Any> {
        match self {
            Slot::Mut(value) => Some(&mut **value),
            Slot::Ref(_) | Slot::Opaque => None,
        }
    }

    #[must_use]
    pub fn value_type_id(&self) -> Option<TypeId> {
        self.get().map(<dyn Any>::type_id)
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Mut(_) => f.write_str("Slot::Mut"),
            Slot::Ref(_) => f.write_str("Slot::Ref"),
            Slot::Opaque => f.write_str("Slot::Opaque"),
        }
    }
}

/// Metadata and storage of one declared field.
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    pub name: &'a str,
    pub kind: Kind,
    pub type_name: &'static str,
    pub exported: bool,
    pub annotations: Annotations<'a>,
    pub slot: Slot<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// Describes an exported field reached through a mutable borrow.
    pub fn new_mut<T>(name: &'a str, value: &'a mut T, annotations: Annotations<'a>) -> Self
    where
        T: Any + HasKind,
    {
        FieldDescriptor::new_mut_with_kind(name, value, annotations, T::KIND)
    }

    /// Describes an exported field reached through a shared borrow.
    pub fn new_ref<T>(name: &'a str, value: &'a T, annotations: Annotations<'a>) -> Self
    where
        T: Any + HasKind,
    {
        FieldDescriptor::new_ref_with_kind(name, value, annotations, T::KIND)
    }

    /// Like [`FieldDescriptor::new_mut`] for a type without a [`HasKind`] impl.
    pub fn new_mut_with_kind<T: Any>(
        name: &'a str,
        value: &'a mut T,
        annotations: Annotations<'a>,
        kind: Kind,
    ) -> Self {
        FieldDescriptor {
            name,
            kind,
            type_name: std::any::type_name::<T>(),
            exported: true,
            annotations,
            slot: Slot::Mut(value),
        }
    }

    /// Like [`FieldDescriptor::new_ref`] for a type without a [`HasKind`] impl.
    pub fn new_ref_with_kind<T: Any>(
        name: &'a str,
        value: &'a T,
        annotations: Annotations<'a>,
        kind: Kind,
    ) -> Self {
        FieldDescriptor {
            name,
            kind,
            type_name: std::any::type_name::<T>(),
            exported: true,
            annotations,
            slot: Slot::Ref(value),
        }
    }

    /// Describes a field that is not visible outside its record.
    #[must_use]
    pub fn hidden(name: &'a str) -> Self {
        FieldDescriptor {
            name,
            kind: Kind::Other,
            type_name: "",
            exported: false,
            annotations: Annotations::EMPTY,
            slot: Slot::Opaque,
        }
    }

    /// Overrides the kind reported for the field.
    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }
}
