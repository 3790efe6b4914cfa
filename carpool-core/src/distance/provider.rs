//! Distance provider trait and the haversine-with-placeholder implementation.

use std::sync::{Mutex, PoisonError};

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::haversine::haversine_km;

/// Lower bound of the placeholder distance, inclusive, in kilometres.
pub const PLACEHOLDER_MIN_KM: f64 = 1.0;
/// Upper bound of the placeholder distance, exclusive, in kilometres.
pub const PLACEHOLDER_MAX_KM: f64 = 11.0;

/// Measure the distance between two pickup points.
///
/// Either point may lack coordinates; implementations decide how to
/// estimate such legs. Implementations must be `Send + Sync` so one provider
/// can serve optimisations running on several threads.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use carpool_core::distance::DistanceProvider;
///
/// struct Manhattan;
///
/// impl DistanceProvider for Manhattan {
///     fn distance_km(&self, from: Option<Coord<f64>>, to: Option<Coord<f64>>) -> f64 {
///         match (from, to) {
///             (Some(a), Some(b)) => (a.x - b.x).abs() + (a.y - b.y).abs(),
///             _ => 0.0,
///         }
///     }
/// }
///
/// let d = Manhattan.distance_km(Some(Coord { x: 0.0, y: 0.0 }), Some(Coord { x: 1.0, y: 2.0 }));
/// assert_eq!(d, 3.0);
/// ```
pub trait DistanceProvider: Send + Sync {
    /// Return the distance in kilometres from `from` to `to`.
    fn distance_km(&self, from: Option<Coord<f64>>, to: Option<Coord<f64>>) -> f64;
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for &P {
    fn distance_km(&self, from: Option<Coord<f64>>, to: Option<Coord<f64>>) -> f64 {
        (**self).distance_km(from, to)
    }
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for std::sync::Arc<P> {
    fn distance_km(&self, from: Option<Coord<f64>>, to: Option<Coord<f64>>) -> f64 {
        (**self).distance_km(from, to)
    }
}

/// Great-circle distances with a random placeholder for ungeocoded riders.
///
/// When both points carry coordinates the haversine distance is returned.
/// Otherwise a distance is drawn uniformly from
/// `[PLACEHOLDER_MIN_KM, PLACEHOLDER_MAX_KM)`. The placeholder stands in for
/// a map distance service; swap in another [`DistanceProvider`] to replace
/// it without touching the heuristics.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use carpool_core::distance::{DistanceProvider, GeoDistance};
///
/// let provider = GeoDistance::seeded(7);
/// let here = Some(Coord { x: 2.35, y: 48.85 });
/// assert_eq!(provider.distance_km(here, here), 0.0);
///
/// let guess = provider.distance_km(here, None);
/// assert!((1.0..11.0).contains(&guess));
/// ```
#[derive(Debug)]
pub struct GeoDistance {
    placeholder_rng: Mutex<ChaCha8Rng>,
}

impl GeoDistance {
    /// Build a provider whose placeholder draws are reproducible.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            placeholder_rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn placeholder_km(&self) -> f64 {
        // A poisoned lock only means another thread panicked mid-draw; the
        // generator state is still usable.
        let mut rng = self
            .placeholder_rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let km = rng.gen_range(PLACEHOLDER_MIN_KM..PLACEHOLDER_MAX_KM);
        log::trace!("no coordinates for leg; using placeholder distance of {km:.2} km");
        km
    }
}

impl Default for GeoDistance {
    /// Seed the placeholder generator from operating-system entropy.
    fn default() -> Self {
        Self {
            placeholder_rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }
}

impl DistanceProvider for GeoDistance {
    fn distance_km(&self, from: Option<Coord<f64>>, to: Option<Coord<f64>>) -> f64 {
        match (from, to) {
            (Some(origin), Some(destination)) => haversine_km(origin, destination),
            _ => self.placeholder_km(),
        }
    }
}
