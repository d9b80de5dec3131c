use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_param_style::{bind, field_spec, from_str, to_string, ParamOptions, PrimitiveKind, Shape, Style};

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct User {
    role: String,
    first_name: String,
    age: u32,
    active: bool,
}

const STYLES: [Style; 4] = [Style::Simple, Style::Label, Style::Matrix, Style::Form];

fn user() -> User {
    User {
        role: "admin".to_string(),
        first_name: "Alex".to_string(),
        age: 30,
        active: true,
    }
}

fn benchmark_decode_scalar(c: &mut Criterion) {
    let options = ParamOptions::new("id").with_style(Style::Matrix);

    c.bench_function("decode_scalar", |b| {
        b.iter(|| from_str::<u64>(black_box(&options), black_box(";id=12345")))
    });
}

fn benchmark_decode_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_array");

    for size in [10, 100, 1000].iter() {
        let options = ParamOptions::new("id").with_style(Style::Form).with_explode(true);
        let values: Vec<u32> = (0..*size).collect();
        let raw = to_string(&options, &values).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| from_str::<Vec<u32>>(black_box(&options), black_box(raw)))
        });
    }
    group.finish();
}

fn benchmark_decode_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_record");

    for style in STYLES {
        for explode in [false, true] {
            let options = ParamOptions::new("user").with_style(style).with_explode(explode);
            let raw = to_string(&options, &user()).unwrap();
            let id = format!("{}/explode={}", style, explode);

            group.bench_with_input(BenchmarkId::from_parameter(id), &raw, |b, raw| {
                b.iter(|| from_str::<User>(black_box(&options), black_box(raw)))
            });
        }
    }
    group.finish();
}

fn benchmark_bind_record(c: &mut Criterion) {
    let options = ParamOptions::new("user").with_style(Style::Label).with_explode(true);
    let shape = Shape::Record(field_spec! {
        "role" => String,
        "firstName" => String,
        "age" => Integer,
        "active" => Boolean,
    });
    let raw = ".role=admin.firstName=Alex.age=30.active=true";

    c.bench_function("bind_record", |b| {
        b.iter(|| bind(black_box(&options), black_box(raw), black_box(&shape)))
    });

    let shape = Shape::Array(PrimitiveKind::Number);
    c.bench_function("bind_array", |b| {
        b.iter(|| bind(black_box(&options), black_box(".1.5.2"), black_box(&shape)))
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let user = user();
    let ids: Vec<i64> = (0..100).collect();

    for style in STYLES {
        let options = ParamOptions::new("p").with_style(style).with_explode(true);
        group.bench_with_input(BenchmarkId::new("record", style), &options, |b, options| {
            b.iter(|| to_string(black_box(options), black_box(&user)))
        });
        group.bench_with_input(BenchmarkId::new("array", style), &options, |b, options| {
            b.iter(|| to_string(black_box(options), black_box(&ids)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode_scalar,
    benchmark_decode_array,
    benchmark_decode_record,
    benchmark_bind_record,
    benchmark_encode
);
criterion_main!(benches);
