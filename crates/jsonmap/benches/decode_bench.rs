use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use jsonmap::{MappingBinder, Options, TargetShape};

fn make_rows(count: usize) -> String {
    let mut s = String::from("{\"rows\":[");
    for i in 0..count {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!(
            r#"{{"id":{i},"price":{i}.25,"name":"item {i}","at":"2020-01-23T01:02:{:02}Z","ok":true}}"#,
            i % 60
        ));
    }
    s.push_str("]}");
    s
}

fn make_strings(count: usize) -> String {
    let mut s = String::from("[");
    for i in 0..count {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!(r#""line {i}\twith \"escapes\" and unicode é""#));
    }
    s.push(']');
    s
}

fn cases() -> Vec<(&'static str, String)> {
    vec![
        ("small", r#"{"name":1,"b":[true,"x"]}"#.to_string()),
        ("rows_1k", make_rows(1000)),
        ("strings_1k", make_strings(1000)),
    ]
}

pub fn decode_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_json_to_value");
    let opts = Options::default();
    for (name, json) in cases() {
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_function(format!("infer::{name}"), |b| {
            b.iter(|| black_box(jsonmap::decode_from_str(black_box(&json), &opts).unwrap()))
        });
        group.bench_function(format!("serde_json::{name}"), |b| {
            b.iter(|| black_box(serde_json::from_str::<serde_json::Value>(black_box(&json)).unwrap()))
        });
    }
    let body = make_rows(1000);
    let binder = MappingBinder::default();
    group.bench_function("bind::rows_1k", |b| {
        b.iter_batched(
            || body.clone().into_bytes(),
            |bytes| black_box(binder.bind(bytes.as_slice(), &TargetShape::of::<jsonmap::Mapping>()).unwrap()),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, decode_benchmarks);
criterion_main!(benches);
