//! Conflict detection over a single trip.

use crate::clock::{display_clock, display_optional_clock};
use crate::{Rider, Trip, Vehicle};

use super::{Conflict, ConflictKind};

/// Inspect trips for feasibility and preference violations.
///
/// The validator is stateless; one instance can be shared freely.
///
/// # Examples
/// ```
/// use carpool_core::conflict::{ConflictKind, ConflictValidator};
/// use carpool_core::{Rider, Trip, Vehicle};
///
/// let trip = Trip::new(
///     Vehicle::new(1, "AB-123-CD", 1),
///     vec![Rider::new(1, "A"), Rider::new(2, "B")],
/// );
/// let validator = ConflictValidator::new();
/// let conflicts = validator.detect(&trip);
///
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].kind, ConflictKind::Capacity);
/// assert!(!validator.is_valid(&trip));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictValidator;

impl ConflictValidator {
    /// Construct a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Detect every conflict in `trip`.
    ///
    /// Conflicts are reported in check order: capacity, availability,
    /// schedule, then preference. A trip without a vehicle cannot be
    /// validated; the result is empty and an error is logged.
    #[must_use]
    pub fn detect(&self, trip: &Trip) -> Vec<Conflict> {
        let Some(vehicle) = trip.vehicle.as_ref() else {
            log::error!("cannot validate trip {:?}: no vehicle assigned", trip.id);
            return Vec::new();
        };
        log::info!("detecting conflicts for trip {:?}", trip.id);

        let mut conflicts = Vec::new();
        conflicts.extend(capacity_conflict(trip, vehicle));
        conflicts.extend(availability_conflict(trip, vehicle));
        conflicts.extend(schedule_conflicts(trip));
        conflicts.extend(preference_conflict(trip));

        log::info!("{} conflict(s) detected", conflicts.len());
        conflicts
    }

    /// Return whether `trip` has no blocking conflict.
    ///
    /// Schedule and preference conflicts do not invalidate a trip.
    #[must_use]
    pub fn is_valid(&self, trip: &Trip) -> bool {
        !self.detect(trip).iter().any(Conflict::is_blocking)
    }

    /// Render a numbered summary of `conflicts`.
    ///
    /// # Examples
    /// ```
    /// use carpool_core::conflict::{Conflict, ConflictKind, ConflictValidator};
    ///
    /// let validator = ConflictValidator::new();
    /// assert_eq!(
    ///     validator.summarise(&[]),
    ///     "No conflicts detected. The trip is valid."
    /// );
    ///
    /// let summary = validator.summarise(&[Conflict::new(ConflictKind::Schedule, "A and B")]);
    /// assert_eq!(summary, "1 conflict(s) detected:\n\n1. [Schedule conflict] A and B\n");
    /// ```
    #[must_use]
    pub fn summarise(&self, conflicts: &[Conflict]) -> String {
        if conflicts.is_empty() {
            return "No conflicts detected. The trip is valid.".to_owned();
        }
        let header = format!("{} conflict(s) detected:\n\n", conflicts.len());
        conflicts
            .iter()
            .enumerate()
            .fold(header, |mut summary, (position, conflict)| {
                summary.push_str(&format!(
                    "{}. [{}] {}\n",
                    position.saturating_add(1),
                    conflict.kind.description(),
                    conflict.message
                ));
                summary
            })
    }
}

fn capacity_conflict(trip: &Trip, vehicle: &Vehicle) -> Option<Conflict> {
    let passengers = trip.riders.len();
    let overflow = vehicle.overflow(passengers)?;
    let conflict = Conflict::new(
        ConflictKind::Capacity,
        format!(
            "vehicle capacity exceeded: {passengers} passengers for {} seats",
            vehicle.capacity
        ),
    )
    .with_details(format!(
        "vehicle {} (capacity: {}), passengers: {passengers}, overflow: {overflow}",
        vehicle.registration, vehicle.capacity
    ))
    .for_trip(trip.id)
    .for_vehicle(vehicle.id);
    log::warn!("capacity conflict: {}", conflict.message);
    Some(conflict)
}

fn availability_conflict(trip: &Trip, vehicle: &Vehicle) -> Option<Conflict> {
    if !vehicle.available {
        let conflict = Conflict::new(
            ConflictKind::Availability,
            format!("vehicle {} is not available", vehicle.registration),
        )
        .for_trip(trip.id)
        .for_vehicle(vehicle.id);
        log::warn!("availability conflict: {}", conflict.message);
        return Some(conflict);
    }

    let window = vehicle.availability?;
    let (rider, pickup) = trip.riders.iter().find_map(|rider| {
        rider
            .pickup_time
            .filter(|pickup| !window.contains(*pickup))
            .map(|pickup| (rider, pickup))
    })?;
    let conflict = Conflict::new(
        ConflictKind::Availability,
        format!(
            "vehicle {} is not available at {} for rider {}",
            vehicle.registration,
            display_clock(pickup),
            rider.name
        ),
    )
    .for_trip(trip.id)
    .for_vehicle(vehicle.id)
    .for_rider(rider.id);
    log::warn!("availability window conflict: {}", conflict.message);
    Some(conflict)
}

fn schedule_conflicts(trip: &Trip) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (position, first) in trip.riders.iter().enumerate() {
        for second in trip.riders.iter().skip(position.saturating_add(1)) {
            if first.schedule_compatible(second) {
                continue;
            }
            let conflict = Conflict::new(
                ConflictKind::Schedule,
                format!("schedule conflict between {} and {}", first.name, second.name),
            )
            .with_details(format!("{} | {}", travel_window(first), travel_window(second)))
            .for_trip(trip.id);
            log::warn!("schedule conflict: {}", conflict.message);
            conflicts.push(conflict);
        }
    }
    conflicts
}

fn travel_window(rider: &Rider) -> String {
    format!(
        "{}: {}-{}",
        rider.name,
        display_optional_clock(rider.pickup_time),
        display_optional_clock(rider.dropoff_time)
    )
}

fn preference_conflict(trip: &Trip) -> Option<Conflict> {
    let total = trip.riders.len();
    let rider = trip.riders.iter().find(|rider| {
        let Some(group) = rider.group_label() else {
            return false;
        };
        let same_group = trip
            .riders
            .iter()
            .filter(|other| other.group_label() == Some(group))
            .count();
        same_group > 0 && same_group < total && rider.preferences.group_priority()
    })?;
    let conflict = Conflict::new(
        ConflictKind::Preference,
        format!(
            "rider {} prefers to travel only with group {}",
            rider.name,
            rider.group_label().unwrap_or_default()
        ),
    )
    .for_trip(trip.id)
    .for_rider(rider.id);
    log::info!("preference conflict: {}", conflict.message);
    Some(conflict)
}
