//! Normalizer throughput benchmarks.
//!
//! Measures how fast each decode tier turns an agent reply into rows. Later
//! tiers only run after earlier ones fail, so their cost includes every
//! failed attempt before them.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `structured` | Replies that already are a sequence of rows |
//! | `strict_text` | Clean JSON text |
//! | `quoted_unescape` | JSON text serialized twice |
//! | `last_resort` | Escaped quotes without an outer wrapper |
//! | `exhausted` | Garbage that falls through every tier |
//! | `decorate` | Id and status assignment on recovered rows |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalization_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use skuboard_core::{decorate, normalize};
use std::hint::black_box;

const SIZES: [usize; 3] = [10, 100, 1_000];

fn rows_value(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                json!({
                    "sku": format!("{i:05}"),
                    "name": format!("Product {i}"),
                    "score": 100.0 - (i as f64) / 10.0,
                })
            })
            .collect(),
    )
}

fn clean(n: usize) -> Value {
    Value::String(rows_value(n).to_string())
}

fn double_encoded(n: usize) -> Value {
    Value::String(clean(n).to_string())
}

fn escaped(n: usize) -> Value {
    Value::String(rows_value(n).to_string().replace('"', "\\\""))
}

fn bench_tier(c: &mut Criterion, group_name: &str, payload: fn(usize) -> Value) {
    let mut group = c.benchmark_group(group_name);
    for n in SIZES {
        let input = payload(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| black_box(normalize(black_box(input))))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

fn structured_bench(c: &mut Criterion) {
    bench_tier(c, "structured", rows_value);
}

fn strict_text_bench(c: &mut Criterion) {
    bench_tier(c, "strict_text", clean);
}

fn quoted_unescape_bench(c: &mut Criterion) {
    bench_tier(c, "quoted_unescape", double_encoded);
}

fn last_resort_bench(c: &mut Criterion) {
    bench_tier(c, "last_resort", escaped);
}

fn exhausted_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhausted");
    let short = Value::String("I could not find any SKUs for that period.".to_string());
    let long = Value::String(format!("\"{}\"", "no rows here ".repeat(500)));

    group.throughput(Throughput::Elements(1));
    group.bench_with_input(BenchmarkId::new("garbage", "short"), &short, |b, input| {
        b.iter(|| black_box(normalize(black_box(input))))
    });
    group.bench_with_input(BenchmarkId::new("garbage", "quoted_long"), &long, |b, input| {
        b.iter(|| black_box(normalize(black_box(input))))
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Decoration
// ---------------------------------------------------------------------------

fn decorate_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("decorate");
    for n in SIZES {
        let rows = normalize(&rows_value(n));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| black_box(decorate(rows.clone())))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion registration
// ---------------------------------------------------------------------------

criterion_group!(
    normalization_benches,
    structured_bench,
    strict_text_bench,
    quoted_unescape_bench,
    last_resort_bench,
    exhausted_bench,
    decorate_bench,
);
criterion_main!(normalization_benches);
