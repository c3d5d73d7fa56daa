//! Property-based tests for the lexer and the validation rules.

use fieldtags::{
    lexer, Annotations, ErrorKind, FieldDescriptor, Key, Kind, Record, Tag, TagSettings, Target,
};
use proptest::prelude::*;

const FLAGGED: &[(&str, &str)] = &[("t", "flag")];

/// A record with a runtime-sized field list; `tagged[i]` decides whether
/// field `i` carries the `t` annotation.
struct Columns {
    names: Vec<String>,
    values: Vec<i64>,
    tagged: Vec<bool>,
}

impl Columns {
    fn new(tagged: Vec<bool>) -> Self {
        Columns {
            names: (0..tagged.len()).map(|i| format!("c{}", i)).collect(),
            values: (0..tagged.len() as i64).collect(),
            tagged,
        }
    }

    fn annotations(tagged: bool) -> Annotations<'static> {
        if tagged {
            Annotations::new(FLAGGED)
        } else {
            Annotations::EMPTY
        }
    }
}

impl Record for Columns {
    fn fields_mut(&mut self) -> Vec<FieldDescriptor<'_>> {
        self.names
            .iter()
            .zip(self.values.iter_mut())
            .zip(self.tagged.iter())
            .map(|((name, value), tagged)| {
                FieldDescriptor::new_mut(name, value, Columns::annotations(*tagged))
            })
            .collect()
    }

    fn fields(&self) -> Vec<FieldDescriptor<'_>> {
        self.names
            .iter()
            .zip(self.values.iter())
            .zip(self.tagged.iter())
            .map(|((name, value), tagged)| {
                FieldDescriptor::new_ref(name, value, Columns::annotations(*tagged))
            })
            .collect()
    }
}

impl Target for Columns {
    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        Some(self)
    }

    fn record(&self) -> Option<&dyn Record> {
        Some(self)
    }
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,12}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_=.-]{0,12}"
}

proptest! {
    #[test]
    fn prop_split_recovers_pairs(pairs in prop::collection::vec((word(), value()), 1..8)) {
        let settings = TagSettings::new("t").with_custom_separators(";", "=");
        let raw = pairs
            .iter()
            .map(|(k, v)| if v.is_empty() { k.clone() } else { format!("{}={}", k, v) })
            .collect::<Vec<_>>()
            .join(";");

        let tags = lexer::split(&raw, &settings).unwrap();
        let expected: Vec<Tag> = pairs.iter().map(|(k, v)| Tag::new(k.as_str(), v.as_str())).collect();
        prop_assert_eq!(tags, expected);
    }

    #[test]
    fn prop_segment_count_matches_separators(segments in prop::collection::vec("[a-z:]{0,6}", 1..10)) {
        let settings = TagSettings::new("t");
        let raw = segments.join(";");
        prop_assume!(!raw.is_empty());

        let tags = lexer::split(&raw, &settings).unwrap();
        prop_assert_eq!(tags.len(), segments.len());
    }

    #[test]
    fn prop_flag_with_value_is_rejected(key in word(), value in "[a-z0-9]{1,8}") {
        let settings = TagSettings::new("t").with_key(Key::flag(key.as_str()));
        let err = settings.validate_tags(&[Tag::new(key.as_str(), value.as_str())], Kind::String).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
    }

    #[test]
    fn prop_value_key_without_value_is_rejected(key in word()) {
        let settings = TagSettings::new("t").with_key(Key::value(key.as_str()));
        let err = settings.validate_tags(&[Tag::new(key.as_str(), "")], Kind::String).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn prop_required_keys_track_keys(flags in prop::collection::vec(any::<bool>(), 0..10)) {
        let mut settings = TagSettings::new("t");
        for (i, required) in flags.iter().enumerate() {
            settings.add_key(Key::new(format!("k{}", i), true, *required));
        }
        settings.remove_key("k0");

        let expected: Vec<String> = settings
            .keys()
            .iter()
            .filter(|key| key.is_required())
            .map(|key| key.name().to_string())
            .collect();
        prop_assert_eq!(settings.required_keys(), expected.as_slice());
    }

    #[test]
    fn prop_fields_keep_declaration_order(tagged in prop::collection::vec(any::<bool>(), 0..16)) {
        let settings = TagSettings::new("t").with_key(Key::flag("flag"));
        let mut columns = Columns::new(tagged.clone());

        let expected: Vec<String> = tagged
            .iter()
            .enumerate()
            .filter(|(_, tagged)| **tagged)
            .map(|(i, _)| format!("c{}", i))
            .collect();
        let fields = settings.parse_struct(&mut columns).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();
        prop_assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
        drop(fields);

        let all = settings
            .clone()
            .include_untagged_fields()
            .parse_struct_ref(&columns)
            .unwrap();
        let values: Vec<i64> = all.iter().filter_map(|f| f.value::<i64>().copied()).collect();
        prop_assert_eq!(values, (0..tagged.len() as i64).collect::<Vec<_>>());
    }
}
