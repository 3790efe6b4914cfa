//! Trips: a vehicle, its riders in pickup order and the route totals.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Rider, Solution, Vehicle};

/// A vehicle with an ordered rider list, ready for validation or storage.
///
/// `riders` is the pickup order. `id` stays `None` until a repository
/// persists the trip.
///
/// # Examples
/// ```
/// use carpool_core::{Rider, Solution, Trip, Vehicle};
///
/// let vehicle = Vehicle::new(1, "AB-123-CD", 4);
/// let solution = Solution::new(vec![Rider::new(1, "A"), Rider::new(2, "B")]);
/// let trip = Trip::from_solution(vehicle, solution);
///
/// assert!(trip.optimised);
/// assert_eq!(trip.seats_available(), 2);
/// assert!((trip.occupancy_percent() - 50.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trip {
    /// Identifier assigned by persistence.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<u64>,
    /// Vehicle carrying the riders.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vehicle: Option<Vehicle>,
    /// Riders in pickup order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub riders: Vec<Rider>,
    /// Total distance in kilometres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_km: f64,
    /// Total duration in minutes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_minutes: f64,
    /// Whether an optimiser produced the rider order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optimised: bool,
}

impl Trip {
    /// Build an unoptimised trip keeping the riders in the given order.
    #[must_use]
    pub const fn new(vehicle: Vehicle, riders: Vec<Rider>) -> Self {
        Self {
            id: None,
            vehicle: Some(vehicle),
            riders,
            distance_km: 0.0,
            duration_minutes: 0.0,
            optimised: false,
        }
    }

    /// Build an optimised trip from an optimiser's solution.
    #[must_use]
    pub fn from_solution(vehicle: Vehicle, solution: Solution) -> Self {
        let distance_km = solution.distance_km();
        let duration_minutes = solution.duration_minutes();
        Self {
            id: None,
            vehicle: Some(vehicle),
            riders: solution.into_riders(),
            distance_km,
            duration_minutes,
            optimised: true,
        }
    }

    /// Replace the rider order and totals with a new solution.
    pub fn apply_solution(&mut self, solution: Solution) {
        self.distance_km = solution.distance_km();
        self.duration_minutes = solution.duration_minutes();
        self.riders = solution.into_riders();
        self.optimised = true;
    }

    /// Identifier of the vehicle, if one is assigned.
    #[must_use]
    pub fn vehicle_id(&self) -> Option<u64> {
        self.vehicle.as_ref().map(|vehicle| vehicle.id)
    }

    /// Return whether another rider fits. Trips without a vehicle cannot be
    /// checked and always accept.
    #[must_use]
    pub fn can_add_rider(&self) -> bool {
        self.vehicle
            .as_ref()
            .is_none_or(|vehicle| vehicle.can_accommodate(self.riders.len().saturating_add(1)))
    }

    /// Seats left; zero without a vehicle.
    #[must_use]
    pub fn seats_available(&self) -> u32 {
        self.vehicle
            .as_ref()
            .map_or(0, |vehicle| vehicle.seats_remaining(self.riders.len()))
    }

    /// Share of seats occupied, as a percentage; zero without a vehicle or
    /// for a zero-capacity vehicle.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "occupancy is reported as a floating-point percentage"
    )]
    pub fn occupancy_percent(&self) -> f64 {
        match &self.vehicle {
            Some(vehicle) if vehicle.capacity > 0 => {
                self.riders.len() as f64 * 100.0 / f64::from(vehicle.capacity)
            }
            _ => 0.0,
        }
    }

    /// Mean distance per rider; zero for an empty trip.
    #[must_use]
    pub fn distance_per_rider(&self) -> f64 {
        per_rider(self.distance_km, self.riders.len())
    }

    /// Mean duration per rider; zero for an empty trip.
    #[must_use]
    pub fn duration_per_rider(&self) -> f64 {
        per_rider(self.duration_minutes, self.riders.len())
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "per-rider averages are floating-point"
)]
fn per_rider(total: f64, riders: usize) -> f64 {
    if riders == 0 {
        0.0
    } else {
        total / riders as f64
    }
}
