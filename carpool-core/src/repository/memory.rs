//! In-memory [`TripRepository`] backed by ordered maps.
//!
//! Used by the CLI to serve a dataset loaded from disk and by tests that
//! need a repository without external storage.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{RepositoryError, TripRepository};
use crate::{Rider, Trip, Vehicle};

#[derive(Debug, Default)]
struct Tables {
    riders: BTreeMap<u64, Rider>,
    vehicles: BTreeMap<u64, Vehicle>,
    trips: BTreeMap<u64, Trip>,
    next_trip_id: u64,
}

/// In-memory `TripRepository` guarded by a mutex.
///
/// Trip identifiers are assigned sequentially from one above the highest
/// identifier already stored.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    /// Add riders, replacing any with the same identifier.
    #[must_use]
    pub fn with_riders<I>(self, riders: I) -> Self
    where
        I: IntoIterator<Item = Rider>,
    {
        {
            let mut tables = self.lock();
            tables
                .riders
                .extend(riders.into_iter().map(|rider| (rider.id, rider)));
        }
        self
    }

    /// Add a vehicle, replacing any with the same identifier.
    #[must_use]
    pub fn with_vehicle(self, vehicle: Vehicle) -> Self {
        self.with_vehicles(std::iter::once(vehicle))
    }

    /// Add vehicles, replacing any with the same identifier.
    #[must_use]
    pub fn with_vehicles<I>(self, vehicles: I) -> Self
    where
        I: IntoIterator<Item = Vehicle>,
    {
        {
            let mut tables = self.lock();
            tables
                .vehicles
                .extend(vehicles.into_iter().map(|vehicle| (vehicle.id, vehicle)));
        }
        self
    }

    /// Add trips. Trips without an identifier receive the next free one.
    #[must_use]
    pub fn with_trips<I>(self, trips: I) -> Self
    where
        I: IntoIterator<Item = Trip>,
    {
        {
            let mut tables = self.lock();
            for trip in trips {
                tables.insert_trip(trip);
            }
        }
        self
    }

    /// Number of stored trips.
    #[must_use]
    pub fn trip_count(&self) -> usize {
        self.lock().trips.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tables {
    fn insert_trip(&mut self, mut trip: Trip) -> Trip {
        let id = match trip.id {
            Some(id) => id,
            None => self.next_trip_id.saturating_add(1),
        };
        self.next_trip_id = self.next_trip_id.max(id);
        trip.id = Some(id);
        self.trips.insert(id, trip.clone());
        trip
    }
}

impl TripRepository for MemoryRepository {
    fn load_rider(&self, id: u64) -> Result<Rider, RepositoryError> {
        self.lock()
            .riders
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::rider_not_found(id))
    }

    fn load_vehicle(&self, id: u64) -> Result<Vehicle, RepositoryError> {
        self.lock()
            .vehicles
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::vehicle_not_found(id))
    }

    fn load_trip(&self, id: u64) -> Result<Trip, RepositoryError> {
        self.lock()
            .trips
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::trip_not_found(id))
    }

    fn save_trip(&self, mut trip: Trip) -> Result<Trip, RepositoryError> {
        trip.id = None;
        Ok(self.lock().insert_trip(trip))
    }

    fn update_trip(&self, trip: &Trip) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        let stored = trip
            .id
            .and_then(|id| tables.trips.get_mut(&id))
            .ok_or_else(|| RepositoryError::trip_not_found(trip.id.unwrap_or_default()))?;
        stored.clone_from(trip);
        Ok(())
    }

    fn list_trips(&self) -> Result<Vec<Trip>, RepositoryError> {
        Ok(self.lock().trips.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> MemoryRepository {
        MemoryRepository::default().with_vehicle(Vehicle::new(10, "V", 4))
    }

    #[rstest]
    fn save_assigns_sequential_ids(repository: MemoryRepository) {
        let vehicle = repository.load_vehicle(10).expect("vehicle exists");
        let first = repository
            .save_trip(Trip::new(vehicle.clone(), Vec::new()))
            .expect("saved");
        let second = repository
            .save_trip(Trip::new(vehicle, Vec::new()))
            .expect("saved");
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repository.list_trips().expect("listed").len(), 2);
    }

    #[rstest]
    fn update_requires_a_persisted_trip(repository: MemoryRepository) {
        let vehicle = repository.load_vehicle(10).expect("vehicle exists");
        let mut trip = repository
            .save_trip(Trip::new(vehicle.clone(), Vec::new()))
            .expect("saved");
        trip.optimised = true;
        repository.update_trip(&trip).expect("updated");
        assert!(repository.load_trip(1).expect("stored").optimised);

        let unsaved = Trip::new(vehicle, Vec::new());
        assert!(matches!(
            repository.update_trip(&unsaved),
            Err(RepositoryError::NotFound { entity: "trip", .. })
        ));
    }

    #[rstest]
    fn seeded_trips_keep_their_ids_and_advance_the_counter(repository: MemoryRepository) {
        let vehicle = repository.load_vehicle(10).expect("vehicle exists");
        let mut stored = Trip::new(vehicle.clone(), Vec::new());
        stored.id = Some(7);
        let seeded = repository.with_trips([stored, Trip::new(vehicle.clone(), Vec::new())]);
        assert_eq!(seeded.trip_count(), 2);
        assert!(seeded.load_trip(7).is_ok());
        assert!(seeded.load_trip(8).is_ok());
        let next = seeded
            .save_trip(Trip::new(vehicle, Vec::new()))
            .expect("saved");
        assert_eq!(next.id, Some(9));
    }

    #[rstest]
    fn later_records_replace_earlier_ones() {
        let repository = MemoryRepository::default()
            .with_riders([Rider::new(1, "first")])
            .with_riders([Rider::new(1, "second")]);
        assert_eq!(repository.load_rider(1).expect("rider exists").name, "second");
    }
}
