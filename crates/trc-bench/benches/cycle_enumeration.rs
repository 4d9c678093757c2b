//! Cycle enumeration benchmarks across validation strategies and size tiers.
//!
//! Every run is bounded (`max_length` + `max_cycles`) so the measured work is
//! the search machinery, not an unbounded combinatorial explosion.
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use trc_bench::{SizeTier, generate_temporal_graph};
use trc_core::{CycleBounds, temporal_cycles};

const TIERS: [(&str, SizeTier); 3] = [
    ("S", SizeTier::Small),
    ("M", SizeTier::Medium),
    ("L", SizeTier::Large),
];

fn bench_exact_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_expansion");

    for (label, tier) in TIERS {
        let graph = generate_temporal_graph(&tier.config(42));
        let bounds = CycleBounds {
            max_length: Some(4),
            max_cycles: Some(1_000),
            ..CycleBounds::default()
        };

        group.bench_function(BenchmarkId::new("capped", label), |b| {
            b.iter(|| temporal_cycles(&graph, &bounds).expect("valid bounds"));
        });
    }

    group.finish();
}

fn bench_structural_first(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural_first");

    for (label, tier) in TIERS {
        let graph = generate_temporal_graph(&tier.config(42));
        let bounds = CycleBounds {
            max_length: Some(4),
            max_cycles: Some(1_000),
            max_combo: Some(16),
            ..CycleBounds::default()
        };

        group.bench_function(BenchmarkId::new("capped", label), |b| {
            b.iter(|| temporal_cycles(&graph, &bounds).expect("valid bounds"));
        });
    }

    group.finish();
}

fn bench_duration_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("duration_window");

    for (label, tier) in TIERS {
        let config = tier.config(42);
        let graph = generate_temporal_graph(&config);
        let bounds = CycleBounds {
            max_length: Some(4),
            max_cycles: Some(1_000),
            max_duration: Some(config.time_range / 10),
            ..CycleBounds::default()
        };

        group.bench_function(BenchmarkId::new("tight", label), |b| {
            b.iter(|| temporal_cycles(&graph, &bounds).expect("valid bounds"));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_exact_expansion,
    bench_structural_first,
    bench_duration_window
);
criterion_main!(benches);
