//! Rewriting field values in place with a processor.
//!
//! Run with: cargo run --example processor

use fieldtags::{Field, Key, Kind, Record, TagSettings};
use std::error::Error;

#[derive(Debug, Record)]
struct Address {
    #[tags(normalize = "upper;trim")]
    pub country: String,
    #[tags(normalize = "trim")]
    pub city: String,
    #[tags(normalize = "clamp:130")]
    pub age: u32,
}

fn normalize(field: &mut Field<'_>) -> Result<(), fieldtags::BoxError> {
    match field.kind() {
        Kind::String => {
            let Some(mut text) = field.value::<String>().cloned() else {
                return Ok(());
            };
            if field.has_key("trim") {
                text = text.trim().to_string();
            }
            if field.has_key("upper") {
                text = text.to_uppercase();
            }
            field.set_value(text)?;
        }
        Kind::U32 => {
            let limit: u32 = field.key_value("clamp").unwrap_or("0").parse()?;
            if let Some(value) = field.value_mut::<u32>() {
                *value = (*value).min(limit);
            }
        }
        _ => {}
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = TagSettings::new("normalize")
        .with_keys([
            Key::flag("upper").with_allowed_kinds([Kind::String]),
            Key::flag("trim").with_allowed_kinds([Kind::String]),
            Key::value("clamp").with_allowed_kinds([Kind::U32]),
        ])
        .with_processor(normalize);

    let mut address = Address {
        country: "  lv ".to_string(),
        city: " Riga ".to_string(),
        age: 999,
    };

    settings.parse_struct(&mut address)?;
    println!("{:?}", address);
    Ok(())
}
