//! Value kinds of record fields.
//!
//! A [`Kind`] is a coarse classification of a field's type, used for
//! [`Key::with_allowed_kinds`](crate::Key::with_allowed_kinds) restrictions and
//! exposed on every parsed [`Field`](crate::Field). [`HasKind`] maps Rust types
//! to their kind; `#[derive(Record)]` implements it as [`Kind::Struct`].
//!
//! Field types without a [`HasKind`] impl (user enums, tuples, foreign types)
//! can either implement it by hand or name their kind on the field with
//! `#[record(kind = Enum)]`, which the derive uses instead of the trait.
//!
//! ```rust
//! use fieldtags::{HasKind, Kind};
//!
//! assert_eq!(<u32 as HasKind>::KIND, Kind::U32);
//! assert_eq!(<Vec<String> as HasKind>::KIND, Kind::Slice);
//! assert_eq!(Kind::String.to_string(), "string");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Coarse classification of a field's value type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    String,
    Array,
    Slice,
    Map,
    Set,
    Option,
    Pointer,
    Unit,
    Struct,
    Enum,
    Other,
}

impl Kind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::I128 => "i128",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::U128 => "u128",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Set => "set",
            Kind::Option => "option",
            Kind::Pointer => "pointer",
            Kind::Unit => "unit",
            Kind::Struct => "struct",
            Kind::Enum => "enum",
            Kind::Other => "other",
        }
    }

    /// Returns `true` for signed and unsigned integer kinds.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::I128
                | Kind::Isize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::U128
                | Kind::Usize
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Kind::F32 | Kind::F64)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types with a statically known [`Kind`].
pub trait HasKind {
    const KIND: Kind;
}

macro_rules! impl_has_kind {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl HasKind for $ty {
                const KIND: Kind = Kind::$kind;
            }
        )*
    };
}

impl_has_kind! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
    &'static str => String,
    () => Unit,
}

impl<T> HasKind for Vec<T> {
    const KIND: Kind = Kind::Slice;
}

impl<T> HasKind for VecDeque<T> {
    const KIND: Kind = Kind::Slice;
}

impl<T, const N: usize> HasKind for [T; N] {
    const KIND: Kind = Kind::Array;
}

impl<T> HasKind for Option<T> {
    const KIND: Kind = Kind::Option;
}

impl<T: ?Sized> HasKind for Box<T> {
    const KIND: Kind = Kind::Pointer;
}

impl<T: ?Sized> HasKind for Rc<T> {
    const KIND: Kind = Kind::Pointer;
}

impl<T: ?Sized> HasKind for Arc<T> {
    const KIND: Kind = Kind::Pointer;
}

impl<K, V, S> HasKind for HashMap<K, V, S> {
    const KIND: Kind = Kind::Map;
}

impl<K, V> HasKind for BTreeMap<K, V> {
    const KIND: Kind = Kind::Map;
}

impl<K, V, S> HasKind for indexmap::IndexMap<K, V, S> {
    const KIND: Kind = Kind::Map;
}

impl<T, S> HasKind for HashSet<T, S> {
    const KIND: Kind = Kind::Set;
}

impl<T> HasKind for BTreeSet<T> {
    const KIND: Kind = Kind::Set;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_kinds() {
        assert_eq!(<bool as HasKind>::KIND, Kind::Bool);
        assert_eq!(<i64 as HasKind>::KIND, Kind::I64);
        assert_eq!(<f32 as HasKind>::KIND, Kind::F32);
        assert_eq!(<&'static str as HasKind>::KIND, Kind::String);
    }

    #[test]
    fn test_container_kinds() {
        assert_eq!(<Option<u8> as HasKind>::KIND, Kind::Option);
        assert_eq!(<[u8; 4] as HasKind>::KIND, Kind::Array);
        assert_eq!(<HashMap<String, i32> as HasKind>::KIND, Kind::Map);
        assert_eq!(<Box<str> as HasKind>::KIND, Kind::Pointer);
    }

    #[test]
    fn test_kind_predicates_and_names() {
        assert!(Kind::U128.is_integer());
        assert!(!Kind::F64.is_integer());
        assert!(Kind::F64.is_float());
        assert_eq!(Kind::Struct.to_string(), "struct");
        assert_eq!(serde_json::to_string(&Kind::Usize).unwrap(), "\"usize\"");
    }
}
