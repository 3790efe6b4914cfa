//! Criterion benchmarks for the pickup-ordering heuristics.
//!
//! Measures optimisation time across rider counts to track performance and
//! detect regressions.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package carpool-solver
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use carpool_core::test_support::rider_at;
use carpool_core::{GeoDistance, Optimiser, Rider, Vehicle};
use carpool_solver::{AnnealingConfig, NearestNeighbour, SimulatedAnnealing};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rider counts to benchmark.
const PROBLEM_SIZES: &[usize] = &[4, 8, 16, 32];

/// Seed shared by rider generation and the annealing schedule.
const BENCHMARK_SEED: u64 = 42;

/// Riders scattered around central Paris, reproducible from the seed.
fn generate_riders(count: usize) -> Vec<Rider> {
    let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
    (1..=count)
        .map(|position| {
            let id = u64::try_from(position).unwrap_or(u64::MAX);
            rider_at(id, rng.gen_range(2.25..2.45), rng.gen_range(48.80..48.90))
        })
        .collect()
}

fn bench_optimise_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimise_time");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(5));

    let construction = NearestNeighbour::new(GeoDistance::seeded(BENCHMARK_SEED));
    let improvement = SimulatedAnnealing::with_config(
        GeoDistance::seeded(BENCHMARK_SEED),
        AnnealingConfig::default().with_seed(BENCHMARK_SEED),
    );

    for &size in PROBLEM_SIZES {
        let riders = generate_riders(size);
        let vehicle = Vehicle::new(1, "BENCH-1", u32::try_from(size).unwrap_or(u32::MAX));

        group.throughput(Throughput::Elements(
            u64::try_from(size).unwrap_or(u64::MAX),
        ));
        group.bench_with_input(BenchmarkId::new("construction", size), &size, |b, _| {
            b.iter(|| construction.optimise(&riders, &vehicle));
        });
        group.bench_with_input(BenchmarkId::new("improvement", size), &size, |b, _| {
            b.iter(|| improvement.optimise(&riders, &vehicle));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_optimise_times);
criterion_main!(benches);
