use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fieldtags::{Key, Record, TagSettings};

#[derive(Record)]
struct Person {
    #[tags(rules = "required,min=2,max=255")]
    pub name: String,
    #[tags(rules = "required,min=10,max=130")]
    pub age: u32,
    #[tags(rules = "required,country")]
    pub country: String,
    #[tags(rules = "required,min=5,max=50,phone")]
    pub phone: String,
    pub notes: String,
}

fn settings() -> TagSettings {
    TagSettings::new("rules")
        .with_custom_separators(",", "=")
        .with_keys([
            Key::flag("required"),
            Key::value("min"),
            Key::value("max"),
            Key::flag("country"),
            Key::flag("phone"),
        ])
}

fn person() -> Person {
    Person {
        name: "Jimmy".to_string(),
        age: 10,
        country: "Estonia".to_string(),
        phone: "2213123112".to_string(),
        notes: String::new(),
    }
}

fn benchmark_parse_struct(c: &mut Criterion) {
    let settings = settings();
    let mut person = person();

    c.bench_function("parse_struct", |b| {
        b.iter(|| {
            let fields = settings.parse_struct(black_box(&mut person));
            black_box(fields.map(|fields| fields.len()))
        })
    });
}

fn benchmark_parse_struct_ref(c: &mut Criterion) {
    let settings = settings().include_untagged_fields();
    let person = person();

    c.bench_function("parse_struct_ref_untagged", |b| {
        b.iter(|| {
            let fields = settings.parse_struct_ref(black_box(&person));
            black_box(fields.map(|fields| fields.len()))
        })
    });
}

fn benchmark_lexer(c: &mut Criterion) {
    let settings = settings();

    c.bench_function("lexer_split", |b| {
        b.iter(|| fieldtags::lexer::split(black_box("required,min=5,max=50,phone"), &settings))
    });
}

criterion_group!(
    benches,
    benchmark_parse_struct,
    benchmark_parse_struct_ref,
    benchmark_lexer
);
criterion_main!(benches);
