//! Simulated-annealing improvement over random pickup orders.
//!
//! Each iteration perturbs the current order with either a swap or a
//! segment reversal (2-opt). Improvements are always accepted; worse orders
//! are accepted with probability `exp(-Δ/T)`, letting the search climb out
//! of local minima while the temperature is high. The best order seen is
//! returned, so the result is never worse than the initial shuffle.

mod config;

use std::time::Instant;

use carpool_core::{
    DistanceProvider, OptimiseError, Optimiser, Rider, Solution, Vehicle, check_capacity,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use config::{AnnealingConfig, AnnealingConfigError};

/// Iterations between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

/// Improve a random pickup order by simulated annealing.
///
/// # Examples
/// ```rust
/// use carpool_core::test_support::{PlanarDistance, rider_at};
/// use carpool_core::{Optimiser, Vehicle};
/// use carpool_solver::{AnnealingConfig, SimulatedAnnealing};
///
/// let riders = vec![rider_at(1, 0.0, 0.0), rider_at(3, 2.0, 0.0), rider_at(2, 1.0, 0.0)];
///
/// let annealing =
///     SimulatedAnnealing::with_config(PlanarDistance, AnnealingConfig::default().with_seed(42));
/// let solution = annealing
///     .optimise(&riders, &Vehicle::new(1, "AB-123-CD", 3))
///     .expect("riders fit");
/// assert_eq!(solution.len(), 3);
/// assert!((solution.distance_km() - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing<D> {
    distance: D,
    config: AnnealingConfig,
}

impl<D: DistanceProvider> SimulatedAnnealing<D> {
    /// Construct the heuristic with the default schedule.
    #[must_use]
    pub fn new(distance: D) -> Self {
        Self::with_config(distance, AnnealingConfig::default())
    }

    /// Construct the heuristic with an explicit schedule.
    ///
    /// The schedule is not validated here; see [`AnnealingConfig::validate`].
    #[must_use]
    pub const fn with_config(distance: D, config: AnnealingConfig) -> Self {
        Self { distance, config }
    }

    /// Borrow the schedule.
    #[must_use]
    pub const fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Optimise using a caller-supplied random source.
    ///
    /// # Errors
    /// Returns [`OptimiseError::CapacityExceeded`] when the riders do not
    /// fit in `vehicle`.
    pub fn optimise_with_rng<R>(
        &self,
        riders: &[Rider],
        vehicle: &Vehicle,
        rng: &mut R,
    ) -> Result<Solution, OptimiseError>
    where
        R: Rng + ?Sized,
    {
        self.optimise_until(riders, vehicle, rng, || false)
    }

    /// Optimise until the schedule ends or `should_stop` returns `true`.
    ///
    /// `should_stop` is polled once per iteration, before the next
    /// neighbour is generated. The best order found so far is returned when
    /// the search is cut short.
    ///
    /// # Errors
    /// Returns [`OptimiseError::CapacityExceeded`] when the riders do not
    /// fit in `vehicle`.
    #[expect(
        clippy::float_arithmetic,
        reason = "acceptance and cooling are floating-point computations"
    )]
    pub fn optimise_until<R, F>(
        &self,
        riders: &[Rider],
        vehicle: &Vehicle,
        rng: &mut R,
        mut should_stop: F,
    ) -> Result<Solution, OptimiseError>
    where
        R: Rng + ?Sized,
        F: FnMut() -> bool,
    {
        if riders.is_empty() {
            log::warn!("no riders to order");
            return Ok(Solution::empty());
        }
        check_capacity(riders, vehicle)?;
        let config = &self.config;
        log::info!(
            "simulated annealing: ordering {} riders (T0={}, alpha={}, iterations={})",
            riders.len(),
            config.initial_temperature,
            config.cooling_rate,
            config.max_iterations
        );
        let started_at = Instant::now();

        let mut current = self.initial_solution(riders, rng);
        let mut best = current.clone();
        let mut temperature = config.initial_temperature;
        let mut without_improvement = 0_usize;
        let mut iteration = 0_usize;

        while iteration < config.max_iterations && temperature > config.min_temperature {
            if config
                .time_limit
                .is_some_and(|limit| started_at.elapsed() >= limit)
            {
                log::info!("time limit reached after {iteration} iterations");
                break;
            }
            if should_stop() {
                log::info!("search cancelled after {iteration} iterations");
                break;
            }

            let candidate = self.neighbour(&current, rng);
            let delta = candidate.cost() - current.cost();
            if delta < 0.0 {
                current = candidate;
                without_improvement = 0;
                if current.cost() < best.cost() {
                    best = current.clone();
                    log::debug!("new best cost {:.2}", best.cost());
                }
            } else {
                let acceptance = (-delta / temperature).exp();
                if rng.r#gen::<f64>() < acceptance {
                    current = candidate;
                    log::trace!("accepted a worse order (p={acceptance:.4})");
                }
                without_improvement += 1;
            }

            temperature *= config.cooling_rate;

            if iteration.is_multiple_of(PROGRESS_INTERVAL) {
                log::debug!(
                    "iteration {iteration}/{}: T={temperature:.2}, current={:.2}, best={:.2}",
                    config.max_iterations,
                    current.cost(),
                    best.cost()
                );
            }

            if without_improvement > config.no_improvement_limit {
                log::info!(
                    "stopping early: no improvement for {} iterations",
                    config.no_improvement_limit
                );
                break;
            }
            iteration += 1;
        }

        log::info!(
            "simulated annealing finished in {:?}: {:.2} km, {:.2} min, cost {:.2}",
            started_at.elapsed(),
            best.distance_km(),
            best.duration_minutes(),
            best.cost()
        );
        Ok(best)
    }

    fn initial_solution<R: Rng + ?Sized>(&self, riders: &[Rider], rng: &mut R) -> Solution {
        let mut order = riders.to_vec();
        order.shuffle(rng);
        let mut solution = Solution::new(order);
        solution.recompute_metrics(&self.distance);
        solution
    }

    fn neighbour<R: Rng + ?Sized>(&self, current: &Solution, rng: &mut R) -> Solution {
        let mut candidate = current.clone();
        let len = candidate.len();
        if len < 2 {
            return candidate;
        }
        let use_swap = rng.r#gen::<bool>();
        let first = rng.gen_range(0..len);
        let second = rng.gen_range(0..len);
        if use_swap {
            candidate.swap(first, second);
        } else {
            candidate.reverse_segment(first.min(second), first.max(second));
        }
        candidate.recompute_metrics(&self.distance);
        candidate
    }
}

impl<D: DistanceProvider> Optimiser for SimulatedAnnealing<D> {
    fn optimise(&self, riders: &[Rider], vehicle: &Vehicle) -> Result<Solution, OptimiseError> {
        let mut rng = self
            .config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        self.optimise_with_rng(riders, vehicle, &mut rng)
    }

    fn name(&self) -> &'static str {
        "simulated_annealing"
    }
}
