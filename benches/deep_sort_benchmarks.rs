// Copyright 2025 Cowboy AI, LLC.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deep_sort::{DeepSort, DeepSortMut, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Nested document: mappings of sequences of integer sequences.
fn nested_document(rng: &mut StdRng, width: usize) -> Value {
    Value::map((0..width).map(|key| {
        let rows: Vec<Value> = (0..width)
            .map(|_| Value::seq((0..8).map(|_| rng.gen_range(-1000i64..1000))))
            .collect();
        (Value::from(format!("k{}", (key * 7919) % width)), Value::Seq(rows))
    }))
}

fn flat_sequence(rng: &mut StdRng, len: usize) -> Value {
    Value::seq((0..len).map(|_| rng.gen_range(0i64..1_000_000)))
}

fn benchmark_flat_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_sequence");
    let mut rng = StdRng::seed_from_u64(7);

    for len in [100, 1_000, 10_000] {
        let input = flat_sequence(&mut rng, len);
        group.bench_with_input(BenchmarkId::new("deep_sort", len), &input, |b, input| {
            b.iter(|| black_box(input.deep_sort().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("deep_sort_mut", len), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |mut v| {
                    v.deep_sort_mut().unwrap();
                    v
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn benchmark_nested_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_document");
    let mut rng = StdRng::seed_from_u64(42);

    for width in [8, 32, 64] {
        let input = nested_document(&mut rng, width);
        group.bench_with_input(BenchmarkId::new("natural", width), &input, |b, input| {
            b.iter(|| black_box(input.deep_sort().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("stringified", width), &input, |b, input| {
            b.iter(|| black_box(input.deep_sort_by(|e| e.to_string()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_flat_sequences, benchmark_nested_documents);
criterion_main!(benches);
