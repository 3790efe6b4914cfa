//! Pickup-ordering heuristics and trip planning for the carpool engine.
//!
//! Two interchangeable [`Optimiser`](carpool_core::Optimiser)s share the
//! [`Solution`](carpool_core::Solution) representation and cost model from
//! `carpool-core`:
//!
//! - [`NearestNeighbour`] builds an order greedily in one pass;
//! - [`SimulatedAnnealing`] improves a random order with swap and 2-opt
//!   moves under a cooling schedule.
//!
//! [`Algorithm`] selects between them by tag, [`optimise`] is the one-call
//! entry point, and [`TripPlanner`] ties the heuristics to a
//! [`TripRepository`](carpool_core::TripRepository) and the conflict
//! validator.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod algorithm;
mod annealing;
mod nearest_neighbour;
mod planner;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use algorithm::{Algorithm, UnknownAlgorithm, optimise};
pub use annealing::{AnnealingConfig, AnnealingConfigError, SimulatedAnnealing};
pub use nearest_neighbour::NearestNeighbour;
pub use planner::{AlgorithmReport, Comparison, PlanError, TripPlanner};
