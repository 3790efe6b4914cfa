//! Deterministic collaborators for unit and behaviour tests.
//!
//! Enabled for this crate's own tests and, through the `test-support`
//! feature, for dependent crates' tests.

use geo::Coord;

use crate::Rider;
use crate::distance::DistanceProvider;

/// `DistanceProvider` returning the same length for every leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDistance(pub f64);

impl DistanceProvider for ConstantDistance {
    fn distance_km(&self, _from: Option<Coord<f64>>, _to: Option<Coord<f64>>) -> f64 {
        self.0
    }
}

/// `DistanceProvider` treating coordinates as planar kilometres.
///
/// Legs with a missing endpoint measure zero, which keeps tests fully
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarDistance;

impl DistanceProvider for PlanarDistance {
    #[expect(
        clippy::float_arithmetic,
        reason = "planar distance is floating-point geometry"
    )]
    fn distance_km(&self, from: Option<Coord<f64>>, to: Option<Coord<f64>>) -> f64 {
        match (from, to) {
            (Some(a), Some(b)) => (a.x - b.x).hypot(a.y - b.y),
            _ => 0.0,
        }
    }
}

/// Build a rider named after its id, placed at `(x, y)`.
#[must_use]
pub fn rider_at(id: u64, x: f64, y: f64) -> Rider {
    Rider::new(id, format!("rider-{id}")).with_location(Coord { x, y })
}
