//! # fieldtags
//!
//! Parse and validate struct field tags against a declarative key schema.
//!
//! ## What are field tags?
//!
//! A field tag is a small annotation string attached to a struct field, namespaced
//! by a name, written in a compact key/value micro-language:
//!
//! ```text
//! #[tags(validator = "required;gt:10;lt:130")]
//! ```
//!
//! `fieldtags` reads the annotation of one namespace from every field of a record,
//! splits it into [`Tag`] tokens, checks them against the [`Key`]s registered in a
//! [`TagSettings`], and returns the fields in declaration order. An optional
//! processor can then inspect or rewrite each field's value in place.
//!
//! ## Key Features
//!
//! - **Declarative schema**: flag keys, value keys, required keys, kind restrictions and custom validators
//! - **Configurable micro-language**: any separator and key/value delimiter (`;` and `:` by default)
//! - **Typed write-back**: [`Field::set_value`] checks exact type identity before writing
//! - **Fail-fast**: the first invalid field aborts the parse, no partial results
//! - **No Unsafe Code**: records describe themselves through [`Record`], usually derived
//!
//! ## Quick Start
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
//!     pub postal: String,
//! }
//!
//! let settings = TagSettings::new("validator")
//!     .with_key(Key::flag("required"))
//!     .with_key(Key::value("gt"))
//!     .with_key(Key::value("lt"));
//!
//! let mut data = MyData { name: "John".to_string(), age: 22, postal: String::new() };
//! let fields = settings.parse_struct(&mut data).unwrap();
//!
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields[1].name(), "age");
//! assert_eq!(fields[1].key_value("gt"), Some("10"));
//! ```
//!
//! ## Processing Fields
//!
//! ```rust
//! use fieldtags::{Key, Record, TagSettings};
//!
//! #[derive(Record)]
//! struct Country {
//!     #[tags(normalize = "upper")]
//!     pub code: String,
//! }
//!
//! let settings = TagSettings::new("normalize")
//!     .with_key(Key::flag("upper"))
//!     .with_processor(|field| {
//!         if field.has_key("upper") {
//!             let upper = field.value::<String>().map(|s| s.to_uppercase());
//!             if let Some(upper) = upper {
//!                 field.set_value(upper)?;
//!             }
//!         }
//!         Ok(())
//!     });
//!
//! let mut country = Country { code: "lv".to_string() };
//! settings.parse_struct(&mut country).unwrap();
//! assert_eq!(country.code, "LV");
//! ```
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`basic.rs`** - a validator-style schema
//! - **`dynamic_keys.rs`** - open vocabularies without key validation
//! - **`processor.rs`** - rewriting field values in place
//!
//! Run any example with: `cargo run --example <name>`

pub mod error;
pub mod field;
pub mod key;
pub mod kind;
pub mod lexer;
pub mod record;
pub mod settings;
pub mod tag;

pub use error::{BoxError, Error, ErrorKind, FieldError, Result};
pub use field::Field;
pub use key::{Key, Validator};
pub use kind::{HasKind, Kind};
pub use record::{Annotations, FieldDescriptor, Record, Slot, Target};
pub use settings::{Processor, TagSettings, DEFAULT_EQUALS, DEFAULT_SEPARATOR};
pub use tag::Tag;

#[cfg(feature = "derive")]
pub use fieldtags_derive::Record;
