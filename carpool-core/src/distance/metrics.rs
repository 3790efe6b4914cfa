//! Distance and duration totals for a pickup sequence.

use crate::Rider;

use super::provider::DistanceProvider;

/// Average urban driving speed used to turn distance into duration.
pub const AVERAGE_SPEED_KMH: f64 = 30.0;

/// Totals for a pickup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteMetrics {
    /// Sum of the legs between consecutive riders, in kilometres.
    pub distance_km: f64,
    /// Driving time at [`AVERAGE_SPEED_KMH`], in minutes.
    pub duration_minutes: f64,
}

impl RouteMetrics {
    /// Measure the legs between consecutive riders.
    ///
    /// Sequences with fewer than two riders have no legs and measure zero.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use carpool_core::Rider;
    /// use carpool_core::distance::{GeoDistance, RouteMetrics};
    ///
    /// let riders = vec![
    ///     Rider::new(1, "A").with_location(Coord { x: 0.0, y: 0.0 }),
    ///     Rider::new(2, "B").with_location(Coord { x: 0.0, y: 0.1 }),
    /// ];
    /// let metrics = RouteMetrics::measure(&riders, &GeoDistance::seeded(0));
    /// assert!((metrics.distance_km - 11.12).abs() < 0.01);
    /// assert!((metrics.duration_minutes - metrics.distance_km * 2.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn measure<P>(riders: &[Rider], provider: &P) -> Self
    where
        P: DistanceProvider + ?Sized,
    {
        let distance_km = riders
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(provider.distance_km(from.location, to.location)),
                _ => None,
            })
            .sum();
        Self::from_distance(distance_km)
    }

    /// Derive the duration for a known distance.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "duration is a floating-point function of distance"
    )]
    pub fn from_distance(distance_km: f64) -> Self {
        Self {
            distance_km,
            duration_minutes: distance_km / AVERAGE_SPEED_KMH * 60.0,
        }
    }
}
