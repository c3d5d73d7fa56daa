//! Open vocabularies: accept any key, or only bare values.
//!
//! Run with: cargo run --example dynamic_keys

use fieldtags::{Record, TagSettings};
use std::error::Error;

#[derive(Debug, Record)]
struct MyData {
    #[tags(my_tag = "my_value", labels = "team:core;tier:gold")]
    pub name: String,
    #[tags(labels = "internal")]
    pub age: u32,
    pub country: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut data = MyData {
        name: "John".to_string(),
        age: 22,
        country: "Latvia".to_string(),
    };

    // Only values: `my_tag = "my_value"`.
    let values = TagSettings::new("my_tag")
        .with_no_key_value_logic()
        .with_no_key_validation();
    for field in values.parse_struct(&mut data)? {
        println!("{}: {:?}", field.name(), field.tags());
    }

    // Any key is accepted, no schema needed.
    let labels = TagSettings::new("labels")
        .with_no_key_validation()
        .include_untagged_fields();
    for field in labels.parse_struct(&mut data)? {
        println!("{}: {:?}", field.name(), field.tag_map());
    }

    Ok(())
}
