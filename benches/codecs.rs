//! Benchmarks for format codecs.
//!
//! Encodes and decodes a store-sized batch (100 records, the default
//! capacity) in every format.

// Criterion macros generate items without docs - this is expected for benchmarks
// Benchmarks use expect/unwrap for simplicity - panics are acceptable in benchmarks
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use datarec::io::{Format, FormatCodec};
use datarec::models::Record;
use std::hint::black_box;

fn sample_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(
                &i.to_string(),
                &format!("Employee {i}"),
                &format!("{i} Long Street, Springfield"),
                &format!("555-{i:04}"),
            )
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let records = sample_records(100);
    let mut group = c.benchmark_group("encode");
    for format in Format::all() {
        group.bench_with_input(BenchmarkId::from_parameter(format), format, |b, format| {
            b.iter(|| format.codec().encode(black_box(&records)).unwrap());
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let records = sample_records(100);
    let mut group = c.benchmark_group("decode");
    for format in Format::all() {
        let bytes = format.codec().encode(&records).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format), &bytes, |b, bytes| {
            b.iter(|| format.codec().decode(black_box(bytes)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
