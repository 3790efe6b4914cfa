//! Facade crate for the carpool pickup-ordering engine.
//!
//! This crate re-exports the core domain types and exposes the heuristics
//! and trip planner behind the `solver` feature.

#![forbid(unsafe_code)]

pub use carpool_core::{
    AvailabilityWindow, Conflict, ConflictKind, ConflictValidator, CostWeights, DistanceProvider,
    GeoDistance, MemoryRepository, OptimiseError, Optimiser, RepositoryError, Rider,
    RiderPreferences, RouteMetrics, Solution, Trip, TripRepository, TripStatistics, Vehicle,
};

#[cfg(feature = "solver")]
pub use carpool_solver::{
    Algorithm, AnnealingConfig, AnnealingConfigError, Comparison, NearestNeighbour, PlanError,
    SimulatedAnnealing, TripPlanner, optimise,
};
