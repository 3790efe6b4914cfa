//! Test-only utilities for `carpool-solver`.
//!
//! The helpers in this module are available to unit tests and, through the
//! `test-support` feature, to benchmarks and downstream crates.

use carpool_core::Rider;
use carpool_core::test_support::rider_at;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Three riders on a line, given out of order: `A` at 0 km, `C` at 2 km and
/// `B` at 1 km.
///
/// With planar distances the nearest-neighbour order is `A, B, C`.
///
/// # Examples
/// ```rust
/// use carpool_solver::test_support::chain_riders;
///
/// let ids: Vec<u64> = chain_riders().iter().map(|rider| rider.id).collect();
/// assert_eq!(ids, vec![1, 3, 2]);
/// ```
#[must_use]
pub fn chain_riders() -> Vec<Rider> {
    vec![
        named(rider_at(1, 0.0, 0.0), "A"),
        named(rider_at(3, 2.0, 0.0), "C"),
        named(rider_at(2, 1.0, 0.0), "B"),
    ]
}

/// Riders scattered uniformly over a square of `side_km`, reproducible from
/// `seed`. Identifiers run from 1 to `count`.
#[must_use]
pub fn scattered_riders(count: usize, side_km: f64, seed: u64) -> Vec<Rider> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (1..=count)
        .map(|position| {
            let id = u64::try_from(position).unwrap_or(u64::MAX);
            rider_at(id, rng.gen_range(0.0..side_km), rng.gen_range(0.0..side_km))
        })
        .collect()
}

fn named(mut rider: Rider, name: &str) -> Rider {
    name.clone_into(&mut rider.name);
    rider
}
