//! Property-based tests for the pickup-ordering heuristics.
//!
//! # Invariants tested
//!
//! - **Permutation:** every heuristic returns each input rider exactly once.
//! - **Capacity:** more riders than seats is always rejected.
//! - **Consistent metrics:** the reported distance matches a re-measurement.
//! - **Monotone best:** annealing never returns an order worse than its own
//!   initial shuffle.


use carpool_core::distance::RouteMetrics;
use carpool_core::test_support::PlanarDistance;
use carpool_core::{OptimiseError, Optimiser, Vehicle};
use carpool_solver::{AnnealingConfig, NearestNeighbour, SimulatedAnnealing};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use proptest_support::{rider_set_strategy, sorted_ids};

fn vehicle_for(count: usize) -> Vehicle {
    Vehicle::new(1, "AB-123-CD", u32::try_from(count).unwrap_or(u32::MAX))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn nearest_neighbour_returns_a_permutation(riders in rider_set_strategy(0, 12)) {
        let solution = NearestNeighbour::new(PlanarDistance)
            .optimise(&riders, &vehicle_for(riders.len()))
            .expect("riders fit");
        prop_assert_eq!(sorted_ids(solution.riders()), sorted_ids(&riders));
        if let Some(first) = riders.first() {
            let ids = solution.rider_ids();
            prop_assert_eq!(ids.first(), Some(&first.id));
        }
    }

    #[test]
    fn annealing_returns_a_permutation(riders in rider_set_strategy(0, 12), seed in any::<u64>()) {
        let annealing = SimulatedAnnealing::with_config(
            PlanarDistance,
            AnnealingConfig::default().with_seed(seed).with_max_iterations(200),
        );
        let solution = annealing
            .optimise(&riders, &vehicle_for(riders.len()))
            .expect("riders fit");
        prop_assert_eq!(sorted_ids(solution.riders()), sorted_ids(&riders));
    }

    #[test]
    fn reported_metrics_match_the_order(riders in rider_set_strategy(1, 10), seed in any::<u64>()) {
        let annealing = SimulatedAnnealing::with_config(
            PlanarDistance,
            AnnealingConfig::default().with_seed(seed).with_max_iterations(100),
        );
        let solution = annealing
            .optimise(&riders, &vehicle_for(riders.len()))
            .expect("riders fit");
        let measured = RouteMetrics::measure(solution.riders(), &PlanarDistance);
        prop_assert!((measured.distance_km - solution.distance_km()).abs() < 1e-6);
        prop_assert!((measured.duration_minutes - solution.duration_minutes()).abs() < 1e-6);
    }

    #[test]
    fn overloaded_vehicles_are_rejected(riders in rider_set_strategy(2, 10)) {
        let capacity = riders.len() - 1;
        let vehicle = vehicle_for(capacity);
        let expected = OptimiseError::CapacityExceeded {
            riders: riders.len(),
            capacity: vehicle.capacity,
        };
        prop_assert_eq!(
            NearestNeighbour::new(PlanarDistance).optimise(&riders, &vehicle),
            Err(expected.clone())
        );
        prop_assert_eq!(
            SimulatedAnnealing::new(PlanarDistance).optimise(&riders, &vehicle),
            Err(expected)
        );
    }

    #[test]
    fn annealing_never_worsens_its_start(riders in rider_set_strategy(2, 10), seed in any::<u64>()) {
        let annealing = SimulatedAnnealing::new(PlanarDistance);
        let vehicle = vehicle_for(riders.len());
        let stopped = annealing
            .optimise_until(&riders, &vehicle, &mut ChaCha8Rng::seed_from_u64(seed), || true)
            .expect("riders fit");
        let finished = annealing
            .optimise_with_rng(&riders, &vehicle, &mut ChaCha8Rng::seed_from_u64(seed))
            .expect("riders fit");
        prop_assert!(finished.cost() <= stopped.cost() + 1e-9);
    }
}
