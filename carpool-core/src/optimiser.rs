//! The optimiser seam shared by every pickup-ordering heuristic.

use thiserror::Error;

use crate::{Rider, Solution, Vehicle};

/// Errors returned by [`Optimiser::optimise`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimiseError {
    /// More riders were requested than the vehicle has seats.
    #[error("{riders} riders exceed the vehicle capacity of {capacity}")]
    CapacityExceeded {
        /// Number of riders requested.
        riders: usize,
        /// Seats offered by the vehicle.
        capacity: u32,
    },
}

/// Order the riders sharing one vehicle.
///
/// Implementations return [`OptimiseError::CapacityExceeded`] before any
/// search when the riders do not fit, and an empty [`Solution`] for an empty
/// rider list. The returned solution is a permutation of the input with its
/// metrics and cost already computed. Optimisers must be `Send + Sync` so a
/// single instance can serve requests on several threads.
///
/// # Examples
/// ```rust
/// use carpool_core::{check_capacity, Optimiser, OptimiseError, Rider, Solution, Vehicle};
///
/// struct KeepOrder;
///
/// impl Optimiser for KeepOrder {
///     fn optimise(&self, riders: &[Rider], vehicle: &Vehicle) -> Result<Solution, OptimiseError> {
///         check_capacity(riders, vehicle)?;
///         Ok(Solution::new(riders.to_vec()))
///     }
/// }
///
/// let vehicle = Vehicle::new(1, "V", 1);
/// let riders = vec![Rider::new(1, "A"), Rider::new(2, "B")];
/// assert!(matches!(
///     KeepOrder.optimise(&riders, &vehicle),
///     Err(OptimiseError::CapacityExceeded { riders: 2, capacity: 1 })
/// ));
/// ```
pub trait Optimiser: Send + Sync {
    /// Produce a pickup order for `riders` in `vehicle`.
    fn optimise(&self, riders: &[Rider], vehicle: &Vehicle) -> Result<Solution, OptimiseError>;

    /// Short name used in logs and comparison reports.
    fn name(&self) -> &'static str {
        "optimiser"
    }
}

impl<O: Optimiser + ?Sized> Optimiser for Box<O> {
    fn optimise(&self, riders: &[Rider], vehicle: &Vehicle) -> Result<Solution, OptimiseError> {
        (**self).optimise(riders, vehicle)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Reject rider lists that do not fit in `vehicle`.
///
/// # Errors
/// Returns [`OptimiseError::CapacityExceeded`] when `riders` outnumber the
/// vehicle's seats.
pub fn check_capacity(riders: &[Rider], vehicle: &Vehicle) -> Result<(), OptimiseError> {
    if vehicle.can_accommodate(riders.len()) {
        Ok(())
    } else {
        log::error!(
            "{} riders do not fit in vehicle {} ({} seats)",
            riders.len(),
            vehicle.id,
            vehicle.capacity
        );
        Err(OptimiseError::CapacityExceeded {
            riders: riders.len(),
            capacity: vehicle.capacity,
        })
    }
}
