//! Persistence collaborator used by trip planning.
//!
//! The engine never stores anything itself. Callers supply a
//! [`TripRepository`] backed by whatever storage they use, or the bundled
//! [`MemoryRepository`].

use thiserror::Error;

use crate::{Rider, Trip, Vehicle};

mod memory;

pub use memory::MemoryRepository;

/// Errors returned by a [`TripRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No record of the requested kind has the given identifier.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record, such as `"rider"` or `"trip"`.
        entity: &'static str,
        /// Requested identifier.
        id: u64,
    },
    /// The storage backend failed.
    #[error("repository backend failed: {0}")]
    Backend(String),
}

impl RepositoryError {
    /// Shorthand for a missing rider.
    #[must_use]
    pub const fn rider_not_found(id: u64) -> Self {
        Self::NotFound { entity: "rider", id }
    }

    /// Shorthand for a missing vehicle.
    #[must_use]
    pub const fn vehicle_not_found(id: u64) -> Self {
        Self::NotFound {
            entity: "vehicle",
            id,
        }
    }

    /// Shorthand for a missing trip.
    #[must_use]
    pub const fn trip_not_found(id: u64) -> Self {
        Self::NotFound { entity: "trip", id }
    }
}

/// Load and store riders, vehicles and trips.
///
/// Implementations must be `Send + Sync`; planners share one repository
/// across threads.
pub trait TripRepository: Send + Sync {
    /// Load a rider by identifier.
    ///
    /// # Errors
    /// [`RepositoryError::NotFound`] when the rider does not exist.
    fn load_rider(&self, id: u64) -> Result<Rider, RepositoryError>;

    /// Load a vehicle by identifier.
    ///
    /// # Errors
    /// [`RepositoryError::NotFound`] when the vehicle does not exist.
    fn load_vehicle(&self, id: u64) -> Result<Vehicle, RepositoryError>;

    /// Load a trip, including its vehicle and riders in pickup order.
    ///
    /// # Errors
    /// [`RepositoryError::NotFound`] when the trip does not exist.
    fn load_trip(&self, id: u64) -> Result<Trip, RepositoryError>;

    /// Persist a new trip and return it with its assigned identifier.
    ///
    /// # Errors
    /// [`RepositoryError::Backend`] when the trip cannot be stored.
    fn save_trip(&self, trip: Trip) -> Result<Trip, RepositoryError>;

    /// Overwrite a persisted trip.
    ///
    /// # Errors
    /// [`RepositoryError::NotFound`] when the trip has no identifier or does
    /// not exist.
    fn update_trip(&self, trip: &Trip) -> Result<(), RepositoryError>;

    /// Return every persisted trip.
    ///
    /// # Errors
    /// [`RepositoryError::Backend`] when the trips cannot be read.
    fn list_trips(&self) -> Result<Vec<Trip>, RepositoryError>;

    /// Load several riders, preserving the order of `ids`.
    ///
    /// # Errors
    /// The first [`RepositoryError`] encountered.
    fn load_riders(&self, ids: &[u64]) -> Result<Vec<Rider>, RepositoryError> {
        ids.iter().map(|id| self.load_rider(*id)).collect()
    }
}

impl<R: TripRepository + ?Sized> TripRepository for &R {
    fn load_rider(&self, id: u64) -> Result<Rider, RepositoryError> {
        (**self).load_rider(id)
    }

    fn load_vehicle(&self, id: u64) -> Result<Vehicle, RepositoryError> {
        (**self).load_vehicle(id)
    }

    fn load_trip(&self, id: u64) -> Result<Trip, RepositoryError> {
        (**self).load_trip(id)
    }

    fn save_trip(&self, trip: Trip) -> Result<Trip, RepositoryError> {
        (**self).save_trip(trip)
    }

    fn update_trip(&self, trip: &Trip) -> Result<(), RepositoryError> {
        (**self).update_trip(trip)
    }

    fn list_trips(&self) -> Result<Vec<Trip>, RepositoryError> {
        (**self).list_trips()
    }
}
