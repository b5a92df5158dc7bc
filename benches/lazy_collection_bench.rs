//! Benchmark for LazyCollection against the eager Collection.
//!
//! The lazy chain never builds intermediate collections, so long pipelines
//! and early bounds are where the two strategies diverge.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use keyseq::{Collection, LazyCollection};
use std::hint::black_box;

// =============================================================================
// Pipeline Benchmark
// =============================================================================

fn benchmark_pipeline(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("pipeline");

    for size in [100, 1000, 10000] {
        let values: Vec<i64> = (0..size).collect();
        let collection = Collection::from(values.clone());

        group.bench_with_input(
            BenchmarkId::new("Collection", size),
            &collection,
            |bencher, collection| {
                bencher.iter(|| {
                    black_box(
                        collection
                            .map(|value| value + 1)
                            .filter(|value| value % 3 != 0)
                            .map(|value| value * 2)
                            .reduce(0, |total, value| total + value),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("LazyCollection", size),
            &values,
            |bencher, values| {
                bencher.iter(|| {
                    let mut lazy = LazyCollection::from_values(values.iter().copied())
                        .map(|value| value + 1)
                        .filter(|value| value % 3 != 0)
                        .map(|value| value * 2);
                    black_box(lazy.reduce(0, |total, value| total + value))
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Early Bound Benchmark
// =============================================================================

fn benchmark_take(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("take_10");

    for size in [1000, 100_000] {
        let collection: Collection<i64> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("Collection", size),
            &collection,
            |bencher, collection| {
                bencher.iter(|| black_box(collection.map(|value| value * 2).take(10, false)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("LazyCollection", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut lazy = LazyCollection::from_values(0..size)
                        .map(|value| value * 2)
                        .take(10);
                    black_box(lazy.persist())
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(benches, benchmark_pipeline, benchmark_take);

criterion_main!(benches);
