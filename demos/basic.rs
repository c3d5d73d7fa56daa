//! A validator-style schema with the default delimiters.
//!
//! Run with: cargo run --example basic

use fieldtags::{Key, Record, TagSettings};
use std::error::Error;

#[derive(Debug, Record)]
struct MyData {
    #[tags(validator = "required")]
    pub name: String,
    #[tags(validator = "gt:10;lt:130")]
    pub age: u32,
    #[tags(validator = "eq:Latvia")]
    pub country: String,
    pub postal: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = TagSettings::new("validator").with_keys([
        Key::flag("required"),
        Key::value("eq"),
        Key::value("gt").with_validator(|v| v.parse::<u32>().map(|_| ()).map_err(Into::into)),
        Key::value("lt").with_validator(|v| v.parse::<u32>().map(|_| ()).map_err(Into::into)),
    ]);

    let mut data = MyData {
        name: "John".to_string(),
        age: 22,
        country: "Latvia".to_string(),
        postal: String::new(),
    };

    let fields = settings.parse_struct(&mut data)?;
    for field in &fields {
        println!("{} ({}): {:?}", field.name(), field.kind(), field.tags_formatted("="));
    }

    println!("\nAs JSON:\n{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}
