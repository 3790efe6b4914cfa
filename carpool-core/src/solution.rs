//! Candidate pickup orders and their cost.
//!
//! A [`Solution`] owns its rider sequence. Structural moves (`swap`,
//! `reverse_segment`) leave the metrics stale; callers re-measure with
//! [`Solution::apply_metrics`] before comparing costs.

use crate::Rider;
use crate::distance::{DistanceProvider, RouteMetrics};

/// Relative weight of distance and duration in a solution's cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    /// Multiplier applied to the total distance in kilometres.
    pub distance: f64,
    /// Multiplier applied to the total duration in minutes.
    pub duration: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            distance: 0.7,
            duration: 0.3,
        }
    }
}

/// An ordered pickup sequence with derived distance, duration and cost.
///
/// # Examples
/// ```
/// use carpool_core::{Rider, Solution};
///
/// let mut solution = Solution::new(vec![
///     Rider::new(1, "A"),
///     Rider::new(2, "B"),
///     Rider::new(3, "C"),
/// ]);
/// solution.reverse_segment(0, 2);
/// assert_eq!(solution.rider_ids(), vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    riders: Vec<Rider>,
    distance_km: f64,
    duration_minutes: f64,
    cost: f64,
}

impl Solution {
    /// Wrap a rider sequence, preserving its order. Metrics start at zero.
    #[must_use]
    pub const fn new(riders: Vec<Rider>) -> Self {
        Self {
            riders,
            distance_km: 0.0,
            duration_minutes: 0.0,
            cost: 0.0,
        }
    }

    /// Construct a solution with no riders and zero metrics.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Riders in pickup order.
    #[must_use]
    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    /// Rider identifiers in pickup order.
    #[must_use]
    pub fn rider_ids(&self) -> Vec<u64> {
        self.riders.iter().map(|rider| rider.id).collect()
    }

    /// Consume the solution and return its riders in pickup order.
    #[must_use]
    pub fn into_riders(self) -> Vec<Rider> {
        self.riders
    }

    /// Number of riders in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.riders.len()
    }

    /// Return whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    /// Total distance in kilometres, as of the last measurement.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Total duration in minutes, as of the last measurement.
    #[must_use]
    pub const fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    /// Combined cost, as of the last measurement.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Exchange the riders at `i` and `j`.
    ///
    /// Out-of-range indices leave the sequence untouched.
    pub fn swap(&mut self, i: usize, j: usize) {
        let len = self.riders.len();
        if i < len && j < len {
            self.riders.swap(i, j);
        }
    }

    /// Reverse the inclusive segment `[from, to]` (a 2-opt move).
    ///
    /// Does nothing unless `from <= to < len`.
    pub fn reverse_segment(&mut self, from: usize, to: usize) {
        if let Some(segment) = self.riders.get_mut(from..=to) {
            segment.reverse();
        }
    }

    /// Store freshly measured metrics and recompute the cost with the
    /// default weights.
    pub fn apply_metrics(&mut self, metrics: RouteMetrics) {
        self.distance_km = metrics.distance_km;
        self.duration_minutes = metrics.duration_minutes;
        self.compute_cost();
    }

    /// Measure the sequence with `provider` and store the result.
    pub fn recompute_metrics<P>(&mut self, provider: &P)
    where
        P: DistanceProvider + ?Sized,
    {
        let metrics = RouteMetrics::measure(&self.riders, provider);
        self.apply_metrics(metrics);
    }

    /// Recompute the cost with the default 70/30 distance/duration split.
    pub fn compute_cost(&mut self) {
        self.compute_cost_with(CostWeights::default());
    }

    /// Recompute the cost with explicit weights.
    ///
    /// # Examples
    /// ```
    /// use carpool_core::distance::RouteMetrics;
    /// use carpool_core::{CostWeights, Solution};
    ///
    /// let mut solution = Solution::empty();
    /// solution.apply_metrics(RouteMetrics::from_distance(15.0));
    /// assert!((solution.cost() - (0.7 * 15.0 + 0.3 * 30.0)).abs() < 1e-9);
    ///
    /// solution.compute_cost_with(CostWeights { distance: 1.0, duration: 0.0 });
    /// assert!((solution.cost() - 15.0).abs() < 1e-9);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "cost is a weighted sum of floating-point metrics"
    )]
    pub fn compute_cost_with(&mut self, weights: CostWeights) {
        self.cost = weights.distance * self.distance_km + weights.duration * self.duration_minutes;
    }
}
