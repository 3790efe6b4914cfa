//! Selecting a heuristic by name.

use std::fmt;
use std::str::FromStr;

use carpool_core::{
    DistanceProvider, GeoDistance, OptimiseError, Optimiser, Rider, Solution, Vehicle,
};
use thiserror::Error;

use crate::{AnnealingConfig, NearestNeighbour, SimulatedAnnealing};

/// The available pickup-ordering heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Greedy nearest-neighbour construction.
    #[default]
    Construction,
    /// Simulated-annealing improvement.
    Improvement,
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{0}': expected construction or improvement")]
pub struct UnknownAlgorithm(pub String);

impl Algorithm {
    /// Both algorithms, construction first.
    pub const ALL: [Self; 2] = [Self::Construction, Self::Improvement];

    /// Canonical name, accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Construction => "construction",
            Self::Improvement => "improvement",
        }
    }

    /// Build the optimiser for this algorithm.
    ///
    /// `config` only affects [`Algorithm::Improvement`].
    ///
    /// # Examples
    /// ```rust
    /// use carpool_core::test_support::PlanarDistance;
    /// use carpool_solver::{Algorithm, AnnealingConfig};
    ///
    /// let optimiser = Algorithm::Construction.optimiser(PlanarDistance, AnnealingConfig::default());
    /// assert_eq!(optimiser.name(), "nearest_neighbour");
    /// ```
    #[must_use]
    pub fn optimiser<D>(self, distance: D, config: AnnealingConfig) -> Box<dyn Optimiser>
    where
        D: DistanceProvider + 'static,
    {
        match self {
            Self::Construction => Box::new(NearestNeighbour::new(distance)),
            Self::Improvement => Box::new(SimulatedAnnealing::with_config(distance, config)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Parse an algorithm name, ignoring case.
    ///
    /// # Examples
    /// ```rust
    /// use carpool_solver::Algorithm;
    ///
    /// assert_eq!("Nearest_Neighbor".parse::<Algorithm>(), Ok(Algorithm::Construction));
    /// assert_eq!("simulated_annealing".parse::<Algorithm>(), Ok(Algorithm::Improvement));
    /// assert!("genetic".parse::<Algorithm>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "construction" | "nearest_neighbour" | "nearest_neighbor" => Ok(Self::Construction),
            "improvement" | "simulated_annealing" => Ok(Self::Improvement),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Order `riders` for `vehicle` with the chosen algorithm.
///
/// Distances are great-circle where riders are geocoded. When
/// `config.seed` is set, both the annealing schedule and the placeholder
/// distances for ungeocoded riders are reproducible.
///
/// # Errors
/// Returns [`OptimiseError::CapacityExceeded`] when the riders do not fit.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use carpool_core::{Rider, Vehicle};
/// use carpool_solver::{Algorithm, AnnealingConfig, optimise};
///
/// let riders = vec![
///     Rider::new(1, "A").with_location(Coord { x: 2.35, y: 48.85 }),
///     Rider::new(2, "B").with_location(Coord { x: 2.29, y: 48.86 }),
/// ];
/// let vehicle = Vehicle::new(1, "AB-123-CD", 4);
/// let solution = optimise(
///     &riders,
///     &vehicle,
///     Algorithm::Construction,
///     &AnnealingConfig::default().with_seed(1),
/// )
/// .expect("riders fit");
/// assert_eq!(solution.rider_ids(), vec![1, 2]);
/// ```
pub fn optimise(
    riders: &[Rider],
    vehicle: &Vehicle,
    algorithm: Algorithm,
    config: &AnnealingConfig,
) -> Result<Solution, OptimiseError> {
    let distance = config.seed.map_or_else(GeoDistance::default, GeoDistance::seeded);
    algorithm
        .optimiser(distance, config.clone())
        .optimise(riders, vehicle)
}
