//! Tuning parameters for simulated annealing.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`AnnealingConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnnealingConfigError {
    /// The starting temperature was zero, negative or not a number.
    #[error("initial temperature must be positive, got {0}")]
    InitialTemperature(f64),
    /// The stopping temperature was zero, negative or not a number.
    #[error("minimum temperature must be positive, got {0}")]
    MinTemperature(f64),
    /// The cooling rate was outside the open interval `(0, 1)`.
    #[error("cooling rate must lie strictly between 0 and 1, got {0}")]
    CoolingRate(f64),
    /// The schedule would stop before it starts.
    #[error("minimum temperature {min} exceeds initial temperature {initial}")]
    InvertedSchedule {
        /// Configured starting temperature.
        initial: f64,
        /// Configured stopping temperature.
        min: f64,
    },
}

/// Configuration for [`SimulatedAnnealing`](crate::SimulatedAnnealing).
///
/// The defaults start at 1000°, cool by 5% per iteration and stop after 1000
/// iterations, below 1°, or after 200 iterations without improvement.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use carpool_solver::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_seed(7)
///     .with_max_iterations(500)
///     .with_time_limit(Duration::from_millis(50));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temperature: f64,
    /// Multiplier applied to the temperature after every iteration.
    pub cooling_rate: f64,
    /// Upper bound on iterations.
    pub max_iterations: usize,
    /// The search stops once the temperature falls to this value.
    pub min_temperature: f64,
    /// The search stops once this many consecutive iterations fail to
    /// improve on the current solution.
    pub no_improvement_limit: usize,
    /// Seed for reproducible runs; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Wall-clock budget, checked between iterations.
    pub time_limit: Option<Duration>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
            max_iterations: 1000,
            min_temperature: 1.0,
            no_improvement_limit: 200,
            seed: None,
            time_limit: None,
        }
    }
}

impl AnnealingConfig {
    /// Set the starting temperature.
    #[must_use]
    pub const fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Set the per-iteration cooling multiplier.
    #[must_use]
    pub const fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Set the iteration cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the stopping temperature.
    #[must_use]
    pub const fn with_min_temperature(mut self, temperature: f64) -> Self {
        self.min_temperature = temperature;
        self
    }

    /// Set how many non-improving iterations end the search early.
    #[must_use]
    pub const fn with_no_improvement_limit(mut self, limit: usize) -> Self {
        self.no_improvement_limit = limit;
        self
    }

    /// Fix the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound the wall-clock time spent searching.
    #[must_use]
    pub const fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Check that the schedule can run.
    ///
    /// # Errors
    /// Returns an [`AnnealingConfigError`] describing the first invalid
    /// parameter.
    pub const fn validate(&self) -> Result<(), AnnealingConfigError> {
        if !is_positive(self.initial_temperature) {
            return Err(AnnealingConfigError::InitialTemperature(
                self.initial_temperature,
            ));
        }
        if !is_positive(self.min_temperature) {
            return Err(AnnealingConfigError::MinTemperature(self.min_temperature));
        }
        if !is_positive(self.cooling_rate) || self.cooling_rate >= 1.0 {
            return Err(AnnealingConfigError::CoolingRate(self.cooling_rate));
        }
        if self.min_temperature > self.initial_temperature {
            return Err(AnnealingConfigError::InvertedSchedule {
                initial: self.initial_temperature,
                min: self.min_temperature,
            });
        }
        Ok(())
    }
}

/// NaN is not positive.
const fn is_positive(value: f64) -> bool {
    value > 0.0
}
