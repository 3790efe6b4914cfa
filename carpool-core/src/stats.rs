//! Aggregate figures over a set of trips.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::Trip;
use crate::conflict::ConflictValidator;

/// Kilograms of CO₂ emitted per car-kilometre avoided.
pub const CO2_KG_PER_KM: f64 = 0.12;

/// Summary statistics across trips.
///
/// # Examples
/// ```
/// use carpool_core::conflict::ConflictValidator;
/// use carpool_core::stats::TripStatistics;
/// use carpool_core::{Rider, Trip, Vehicle};
///
/// let mut trip = Trip::new(
///     Vehicle::new(1, "V", 4),
///     vec![Rider::new(1, "A"), Rider::new(2, "B"), Rider::new(3, "C")],
/// );
/// trip.distance_km = 10.0;
///
/// let stats = TripStatistics::from_trips(&[trip], &ConflictValidator::new())
///     .expect("one trip");
/// assert!((stats.km_saved - 20.0).abs() < 1e-9);
/// assert!((stats.co2_saved_kg - 2.4).abs() < 1e-9);
/// assert!((stats.mean_occupancy_percent - 75.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TripStatistics {
    /// Number of trips summarised.
    pub total_trips: usize,
    /// Trips whose order came from an optimiser.
    pub optimised_trips: usize,
    /// Trips kept in their submitted order.
    pub unoptimised_trips: usize,
    /// Sum of trip distances in kilometres.
    pub total_distance_km: f64,
    /// Mean trip distance in kilometres.
    pub mean_distance_km: f64,
    /// Mean trip duration in minutes.
    pub mean_duration_minutes: f64,
    /// Mean occupancy over trips with a vehicle, as a percentage.
    pub mean_occupancy_percent: f64,
    /// Riders carried across all trips.
    pub total_riders: usize,
    /// Mean riders per trip.
    pub mean_riders_per_trip: f64,
    /// Conflicts detected across all trips.
    pub total_conflicts: usize,
    /// Kilometres not driven because riders shared a car.
    pub km_saved: f64,
    /// CO₂ not emitted, in kilograms.
    pub co2_saved_kg: f64,
}

impl TripStatistics {
    /// Summarise `trips`, running `validator` over each to count conflicts.
    ///
    /// Returns `None` when there are no trips. Each trip of `n > 1` riders
    /// saves `(n - 1) × distance` kilometres, assuming every rider would
    /// otherwise have driven alone.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "statistics are floating-point aggregates"
    )]
    pub fn from_trips(trips: &[Trip], validator: &ConflictValidator) -> Option<Self> {
        if trips.is_empty() {
            log::warn!("no trips to summarise");
            return None;
        }
        let count = trips.len() as f64;

        let total_distance_km: f64 = trips.iter().map(|trip| trip.distance_km).sum();
        let total_duration: f64 = trips.iter().map(|trip| trip.duration_minutes).sum();
        let optimised_trips = trips.iter().filter(|trip| trip.optimised).count();
        let total_riders: usize = trips.iter().map(|trip| trip.riders.len()).sum();
        let total_conflicts: usize = trips.iter().map(|trip| validator.detect(trip).len()).sum();

        let occupancies: Vec<f64> = trips
            .iter()
            .filter(|trip| trip.vehicle.is_some())
            .map(Trip::occupancy_percent)
            .collect();
        let mean_occupancy_percent = if occupancies.is_empty() {
            0.0
        } else {
            occupancies.iter().sum::<f64>() / occupancies.len() as f64
        };

        let km_saved: f64 = trips
            .iter()
            .filter(|trip| trip.riders.len() > 1)
            .map(|trip| (trip.riders.len() - 1) as f64 * trip.distance_km)
            .sum();

        let stats = Self {
            total_trips: trips.len(),
            optimised_trips,
            unoptimised_trips: trips.len() - optimised_trips,
            total_distance_km,
            mean_distance_km: total_distance_km / count,
            mean_duration_minutes: total_duration / count,
            mean_occupancy_percent,
            total_riders,
            mean_riders_per_trip: total_riders as f64 / count,
            total_conflicts,
            km_saved,
            co2_saved_kg: km_saved * CO2_KG_PER_KM,
        };
        log::info!(
            "summarised {} trips: {:.2} km total, {:.1}% occupancy",
            stats.total_trips,
            stats.total_distance_km,
            stats.mean_occupancy_percent
        );
        Some(stats)
    }
}
