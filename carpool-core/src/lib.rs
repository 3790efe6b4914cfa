//! Core domain types for the carpool engine.
//!
//! Riders, vehicles and trips; the [`Solution`] representation and cost
//! model shared by every heuristic; the [`Optimiser`] seam; distance
//! measurement; conflict detection; and the persistence collaborator used
//! by trip planning.
//!
//! Heuristics live in `carpool-solver`. This crate only defines what they
//! consume and produce.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
pub mod conflict;
pub mod distance;
mod optimiser;
pub mod repository;
mod rider;
mod solution;
pub mod stats;
mod trip;
mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use conflict::{Conflict, ConflictKind, ConflictValidator};
pub use distance::{DistanceProvider, GeoDistance, RouteMetrics};
pub use optimiser::{OptimiseError, Optimiser, check_capacity};
pub use repository::{MemoryRepository, RepositoryError, TripRepository};
pub use rider::{GROUP_PRIORITY_KEY, Rider, RiderPreferences};
pub use solution::{CostWeights, Solution};
pub use stats::TripStatistics;
pub use trip::Trip;
pub use vehicle::{AvailabilityWindow, Vehicle};
