//! Planning trips against a repository: load, optimise, validate, persist.

use std::sync::Arc;
use std::time::{Duration, Instant};

use carpool_core::{
    Conflict, ConflictValidator, DistanceProvider, GeoDistance, OptimiseError, RepositoryError,
    Rider, Solution, Trip, TripRepository, Vehicle, check_capacity,
};
use thiserror::Error;

use crate::{Algorithm, AnnealingConfig, AnnealingConfigError};

/// Errors returned by [`TripPlanner`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A rider, vehicle or trip could not be loaded or stored.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// The optimiser rejected the request.
    #[error(transparent)]
    Optimise(#[from] OptimiseError),
    /// The annealing schedule is unusable.
    #[error("invalid annealing configuration: {0}")]
    Config(#[from] AnnealingConfigError),
    /// The optimised trip has capacity or availability conflicts.
    #[error("trip has blocking conflicts ({} conflict(s) in total)", .0.len())]
    BlockingConflicts(Vec<Conflict>),
    /// A stored trip has no vehicle to re-optimise for.
    #[error("trip {trip_id} has no vehicle")]
    MissingVehicle {
        /// Identifier of the stored trip.
        trip_id: u64,
    },
}

/// One algorithm's result in a [`Comparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmReport {
    /// Algorithm that produced the order.
    pub algorithm: Algorithm,
    /// Total distance in kilometres.
    pub distance_km: f64,
    /// Total duration in minutes.
    pub duration_minutes: f64,
    /// Weighted cost.
    pub cost: f64,
    /// Wall-clock time spent optimising.
    pub elapsed: Duration,
    /// Unsaved trip carrying the order, for display. It is never marked
    /// optimised since no order has been committed.
    pub trip: Trip,
}

impl AlgorithmReport {
    fn new(algorithm: Algorithm, vehicle: &Vehicle, solution: Solution, elapsed: Duration) -> Self {
        let distance_km = solution.distance_km();
        let duration_minutes = solution.duration_minutes();
        let cost = solution.cost();
        Self {
            algorithm,
            distance_km,
            duration_minutes,
            cost,
            elapsed,
            trip: Trip {
                distance_km,
                duration_minutes,
                ..Trip::new(vehicle.clone(), solution.into_riders())
            },
        }
    }
}

/// Both algorithms run on the same riders.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Nearest-neighbour result.
    pub construction: AlgorithmReport,
    /// Simulated-annealing result.
    pub improvement: AlgorithmReport,
    /// Cheaper algorithm; construction wins only when strictly cheaper.
    pub winner: Algorithm,
    /// Cost reduction of annealing relative to nearest neighbour, as a
    /// percentage. Zero when nearest neighbour wins or costs nothing.
    pub improvement_percent: f64,
}

impl Comparison {
    #[expect(
        clippy::float_arithmetic,
        reason = "relative improvement is a floating-point percentage"
    )]
    fn new(construction: AlgorithmReport, improvement: AlgorithmReport) -> Self {
        let (winner, improvement_percent) = if construction.cost < improvement.cost {
            (Algorithm::Construction, 0.0)
        } else if construction.cost > 0.0 {
            (
                Algorithm::Improvement,
                (construction.cost - improvement.cost) / construction.cost * 100.0,
            )
        } else {
            (Algorithm::Improvement, 0.0)
        };
        Self {
            construction,
            improvement,
            winner,
            improvement_percent,
        }
    }
}

/// Coordinates a repository, the heuristics and the conflict validator.
///
/// # Examples
/// ```rust
/// use carpool_core::test_support::{PlanarDistance, rider_at};
/// use carpool_core::{MemoryRepository, TripRepository, Vehicle};
/// use carpool_solver::{Algorithm, TripPlanner};
///
/// let riders = vec![rider_at(1, 0.0, 0.0), rider_at(3, 2.0, 0.0), rider_at(2, 1.0, 0.0)];
///
/// let repository = MemoryRepository::default()
///     .with_riders(riders)
///     .with_vehicle(Vehicle::new(1, "AB-123-CD", 3));
/// let planner = TripPlanner::new(repository).with_distance(PlanarDistance);
///
/// let trip = planner.plan(1, &[1, 3, 2], Algorithm::Construction).expect("plan succeeds");
/// assert_eq!(trip.id, Some(1));
/// assert!(trip.optimised);
/// assert_eq!(planner.repository().list_trips().expect("listed").len(), 1);
/// ```
pub struct TripPlanner<R> {
    repository: R,
    distance: Arc<dyn DistanceProvider>,
    config: AnnealingConfig,
    validator: ConflictValidator,
}

impl<R: TripRepository> TripPlanner<R> {
    /// Plan against `repository` with great-circle distances and the
    /// default annealing schedule.
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            distance: Arc::new(GeoDistance::default()),
            config: AnnealingConfig::default(),
            validator: ConflictValidator::new(),
        }
    }

    /// Replace the distance provider.
    #[must_use]
    pub fn with_distance<D>(mut self, distance: D) -> Self
    where
        D: DistanceProvider + 'static,
    {
        self.distance = Arc::new(distance);
        self
    }

    /// Replace the annealing schedule.
    #[must_use]
    pub fn with_config(mut self, config: AnnealingConfig) -> Self {
        self.config = config;
        self
    }

    /// Borrow the repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Optimise the given riders into a new trip and persist it.
    ///
    /// # Errors
    /// [`PlanError::Repository`] when a rider or the vehicle is missing,
    /// [`PlanError::Optimise`] when the riders do not fit,
    /// [`PlanError::BlockingConflicts`] when the optimised trip is invalid.
    /// Nothing is persisted on error.
    pub fn plan(
        &self,
        vehicle_id: u64,
        rider_ids: &[u64],
        algorithm: Algorithm,
    ) -> Result<Trip, PlanError> {
        log::info!(
            "planning vehicle {vehicle_id} with {} riders using {algorithm}",
            rider_ids.len()
        );
        let vehicle = self.repository.load_vehicle(vehicle_id)?;
        let riders = self.repository.load_riders(rider_ids)?;
        check_capacity(&riders, &vehicle)?;

        let solution = self.run(algorithm, &riders, &vehicle)?;
        let trip = Trip::from_solution(vehicle, solution);

        let conflicts = self.validator.detect(&trip);
        if conflicts.iter().any(Conflict::is_blocking) {
            log::warn!("optimised trip has blocking conflicts");
            return Err(PlanError::BlockingConflicts(conflicts));
        }

        let saved = self.repository.save_trip(trip)?;
        log::info!(
            "saved trip {:?}: {:.2} km, {:.2} min",
            saved.id,
            saved.distance_km,
            saved.duration_minutes
        );
        Ok(saved)
    }

    /// Re-optimise a stored trip's riders and update it.
    ///
    /// The vehicle is reloaded so capacity and availability changes apply.
    ///
    /// # Errors
    /// [`PlanError::Repository`] when the trip or its vehicle is missing,
    /// [`PlanError::MissingVehicle`] when the trip has no vehicle,
    /// [`PlanError::Optimise`] when the riders no longer fit.
    pub fn replan(&self, trip_id: u64, algorithm: Algorithm) -> Result<Trip, PlanError> {
        log::info!("re-planning trip {trip_id} using {algorithm}");
        let mut trip = self.repository.load_trip(trip_id)?;
        let vehicle_id = trip
            .vehicle_id()
            .ok_or(PlanError::MissingVehicle { trip_id })?;
        let vehicle = self.repository.load_vehicle(vehicle_id)?;

        let solution = self.run(algorithm, &trip.riders, &vehicle)?;
        trip.apply_solution(solution);
        trip.vehicle = Some(vehicle);
        self.repository.update_trip(&trip)?;
        log::info!("trip {trip_id} re-planned");
        Ok(trip)
    }

    /// Run both algorithms on the same riders and report which is cheaper.
    ///
    /// Nothing is persisted.
    ///
    /// # Errors
    /// [`PlanError::Repository`] when a rider or the vehicle is missing,
    /// [`PlanError::Optimise`] when the riders do not fit.
    pub fn compare(&self, vehicle_id: u64, rider_ids: &[u64]) -> Result<Comparison, PlanError> {
        log::info!("comparing algorithms for {} riders", rider_ids.len());
        let vehicle = self.repository.load_vehicle(vehicle_id)?;
        let riders = self.repository.load_riders(rider_ids)?;

        let construction = self.report(Algorithm::Construction, &riders, &vehicle)?;
        let improvement = self.report(Algorithm::Improvement, &riders, &vehicle)?;
        let comparison = Comparison::new(construction, improvement);
        log::info!(
            "comparison finished: {} wins, {:.2}% improvement",
            comparison.winner,
            comparison.improvement_percent
        );
        Ok(comparison)
    }

    fn report(
        &self,
        algorithm: Algorithm,
        riders: &[Rider],
        vehicle: &Vehicle,
    ) -> Result<AlgorithmReport, PlanError> {
        let started_at = Instant::now();
        let solution = self.run(algorithm, riders, vehicle)?;
        Ok(AlgorithmReport::new(
            algorithm,
            vehicle,
            solution,
            started_at.elapsed(),
        ))
    }

    fn run(
        &self,
        algorithm: Algorithm,
        riders: &[Rider],
        vehicle: &Vehicle,
    ) -> Result<Solution, PlanError> {
        self.config.validate()?;
        let optimiser = algorithm.optimiser(Arc::clone(&self.distance), self.config.clone());
        Ok(optimiser.optimise(riders, vehicle)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carpool_core::test_support::PlanarDistance;
    use carpool_core::{ConflictKind, MemoryRepository, Vehicle};
    use rstest::{fixture, rstest};
    use time::macros::time;

    use crate::test_support::chain_riders;

    #[fixture]
    fn planner() -> TripPlanner<MemoryRepository> {
        let repository = MemoryRepository::default()
            .with_riders(chain_riders())
            .with_vehicles([
                Vehicle::new(1, "AB-123-CD", 3),
                Vehicle::new(2, "EF-456-GH", 2),
                Vehicle::new(3, "IJ-789-KL", 3).with_available(false),
            ]);
        TripPlanner::new(repository)
            .with_distance(PlanarDistance)
            .with_config(AnnealingConfig::default().with_seed(5))
    }

    #[rstest]
    #[case(Algorithm::Construction)]
    #[case(Algorithm::Improvement)]
    fn plan_persists_an_optimised_trip(
        planner: TripPlanner<MemoryRepository>,
        #[case] algorithm: Algorithm,
    ) {
        let trip = planner.plan(1, &[1, 3, 2], algorithm).expect("plan succeeds");
        assert_eq!(trip.id, Some(1));
        assert!(trip.optimised);
        assert!((trip.distance_km - 2.0).abs() < 1e-9);
        assert_eq!(planner.repository().trip_count(), 1);
    }

    #[rstest]
    fn plan_rejects_overloaded_vehicle(planner: TripPlanner<MemoryRepository>) {
        let err = planner
            .plan(2, &[1, 2, 3], Algorithm::Construction)
            .expect_err("three riders do not fit");
        assert_eq!(
            err,
            PlanError::Optimise(OptimiseError::CapacityExceeded {
                riders: 3,
                capacity: 2
            })
        );
        assert_eq!(planner.repository().trip_count(), 0);
    }

    #[rstest]
    fn plan_rejects_blocking_conflicts(planner: TripPlanner<MemoryRepository>) {
        let err = planner
            .plan(3, &[1, 2], Algorithm::Construction)
            .expect_err("vehicle is out of service");
        let PlanError::BlockingConflicts(conflicts) = err else {
            panic!("expected blocking conflicts, got {err:?}");
        };
        assert_eq!(conflicts[0].kind, ConflictKind::Availability);
        assert_eq!(planner.repository().trip_count(), 0);
    }

    #[rstest]
    #[case(99, vec![1], "vehicle")]
    #[case(1, vec![1, 42], "rider")]
    fn plan_surfaces_missing_records(
        planner: TripPlanner<MemoryRepository>,
        #[case] vehicle_id: u64,
        #[case] rider_ids: Vec<u64>,
        #[case] entity: &str,
    ) {
        let err = planner
            .plan(vehicle_id, &rider_ids, Algorithm::Construction)
            .expect_err("record is missing");
        assert!(matches!(
            err,
            PlanError::Repository(RepositoryError::NotFound { entity: found, .. }) if found == entity
        ));
    }

    #[rstest]
    fn plan_rejects_invalid_schedule(planner: TripPlanner<MemoryRepository>) {
        let strict = planner.with_config(AnnealingConfig::default().with_cooling_rate(1.5));
        let err = strict
            .plan(1, &[1, 2], Algorithm::Improvement)
            .expect_err("cooling rate is invalid");
        assert_eq!(err, PlanError::Config(AnnealingConfigError::CoolingRate(1.5)));
    }

    #[rstest]
    fn replan_updates_the_stored_trip(planner: TripPlanner<MemoryRepository>) {
        let vehicle = planner.repository().load_vehicle(1).expect("vehicle exists");
        let stored = planner
            .repository()
            .save_trip(Trip::new(vehicle, chain_riders()))
            .expect("saved");
        let trip_id = stored.id.expect("id assigned");

        let replanned = planner
            .replan(trip_id, Algorithm::Construction)
            .expect("replan succeeds");
        assert!(replanned.optimised);
        assert_eq!(
            replanned.riders.iter().map(|rider| rider.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        let reloaded = planner.repository().load_trip(trip_id).expect("stored");
        assert_eq!(reloaded, replanned);
    }

    #[rstest]
    fn replan_requires_a_vehicle(planner: TripPlanner<MemoryRepository>) {
        let stored = planner
            .repository()
            .save_trip(Trip {
                riders: chain_riders(),
                ..Trip::default()
            })
            .expect("saved");
        let trip_id = stored.id.expect("id assigned");
        assert_eq!(
            planner.replan(trip_id, Algorithm::Improvement),
            Err(PlanError::MissingVehicle { trip_id })
        );
    }

    #[rstest]
    fn compare_prefers_annealing_on_ties(planner: TripPlanner<MemoryRepository>) {
        let comparison = planner.compare(1, &[1, 3, 2]).expect("comparison runs");
        assert!((comparison.construction.cost - comparison.improvement.cost).abs() < 1e-9);
        assert_eq!(comparison.winner, Algorithm::Improvement);
        assert!(comparison.improvement_percent.abs() < 1e-9);
        assert_eq!(comparison.construction.algorithm, Algorithm::Construction);
        assert_eq!(planner.repository().trip_count(), 0);
    }

    #[rstest]
    fn compared_trips_are_display_only(planner: TripPlanner<MemoryRepository>) {
        let comparison = planner.compare(1, &[1, 3, 2]).expect("comparison runs");
        for report in [&comparison.construction, &comparison.improvement] {
            assert!(!report.trip.optimised);
            assert_eq!(report.trip.id, None);
            assert_eq!(report.trip.vehicle_id(), Some(1));
            assert_eq!(report.trip.riders.len(), 3);
            assert!((report.trip.distance_km - report.distance_km).abs() < 1e-9);
            assert!((report.trip.duration_minutes - report.duration_minutes).abs() < 1e-9);
        }
    }

    fn report(cost: f64) -> AlgorithmReport {
        AlgorithmReport {
            algorithm: Algorithm::Construction,
            distance_km: 0.0,
            duration_minutes: 0.0,
            cost,
            elapsed: Duration::ZERO,
            trip: Trip::default(),
        }
    }

    #[rstest]
    #[case(10.0, 8.0, Algorithm::Improvement, 20.0)]
    #[case(8.0, 10.0, Algorithm::Construction, 0.0)]
    #[case(0.0, 0.0, Algorithm::Improvement, 0.0)]
    fn comparison_picks_the_cheaper_order(
        #[case] construction: f64,
        #[case] improvement: f64,
        #[case] winner: Algorithm,
        #[case] percent: f64,
    ) {
        let comparison = Comparison::new(report(construction), report(improvement));
        assert_eq!(comparison.winner, winner);
        assert!((comparison.improvement_percent - percent).abs() < 1e-9);
    }

    #[rstest]
    fn plan_allows_advisory_conflicts() {
        let riders = vec![
            chain_riders()[0].clone().with_pickup_window(time!(08:00), time!(08:10)),
            chain_riders()[2].clone().with_pickup_window(time!(09:00), time!(09:10)),
        ];
        let planner = TripPlanner::new(
            MemoryRepository::default()
                .with_riders(chain_riders())
                .with_vehicle(Vehicle::new(1, "V", 2)),
        )
        .with_distance(PlanarDistance);
        let trip = planner
            .plan(1, &[1, 2], Algorithm::Construction)
            .expect("schedule conflicts do not block");
        assert_eq!(trip.riders.len(), 2);
    }
}
