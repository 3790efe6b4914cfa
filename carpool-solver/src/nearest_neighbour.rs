//! Greedy nearest-neighbour construction.

use std::time::Instant;

use carpool_core::{
    DistanceProvider, OptimiseError, Optimiser, Rider, Solution, Vehicle, check_capacity,
};

/// Build a pickup order by always driving to the closest unvisited rider.
///
/// The tour starts at the first rider in input order. Ties go to the rider
/// listed first. Runs in `O(n²)` distance evaluations.
///
/// # Examples
/// ```rust
/// use carpool_core::test_support::{PlanarDistance, rider_at};
/// use carpool_core::{Optimiser, Vehicle};
/// use carpool_solver::NearestNeighbour;
///
/// let riders = vec![rider_at(1, 0.0, 0.0), rider_at(3, 2.0, 0.0), rider_at(2, 1.0, 0.0)];
///
/// let solution = NearestNeighbour::new(PlanarDistance)
///     .optimise(&riders, &Vehicle::new(1, "AB-123-CD", 3))
///     .expect("riders fit");
/// assert_eq!(solution.rider_ids(), vec![1, 2, 3]);
/// assert!((solution.distance_km() - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NearestNeighbour<D> {
    distance: D,
}

impl<D: DistanceProvider> NearestNeighbour<D> {
    /// Construct the heuristic over a distance provider.
    #[must_use]
    pub const fn new(distance: D) -> Self {
        Self { distance }
    }

    /// Borrow the distance provider.
    #[must_use]
    pub const fn distance(&self) -> &D {
        &self.distance
    }

    fn closest(&self, from: &Rider, candidates: &[Rider]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (position, candidate) in candidates.iter().enumerate() {
            let distance = self.distance.distance_km(from.location, candidate.location);
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((position, distance));
            }
        }
        best.map(|(position, _)| position)
    }
}

impl<D: DistanceProvider> Optimiser for NearestNeighbour<D> {
    fn optimise(&self, riders: &[Rider], vehicle: &Vehicle) -> Result<Solution, OptimiseError> {
        let Some((first, rest)) = riders.split_first() else {
            log::warn!("no riders to order");
            return Ok(Solution::empty());
        };
        check_capacity(riders, vehicle)?;
        log::info!("nearest neighbour: ordering {} riders", riders.len());
        let started_at = Instant::now();

        let mut order = Vec::with_capacity(riders.len());
        let mut unvisited = rest.to_vec();
        let mut current = first.clone();
        while let Some(position) = self.closest(&current, &unvisited) {
            let next = unvisited.remove(position);
            order.push(std::mem::replace(&mut current, next));
        }
        order.push(current);

        let mut solution = Solution::new(order);
        solution.recompute_metrics(&self.distance);
        log::info!(
            "nearest neighbour finished in {:?}: {:.2} km, {:.2} min, cost {:.2}",
            started_at.elapsed(),
            solution.distance_km(),
            solution.duration_minutes(),
            solution.cost()
        );
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "nearest_neighbour"
    }
}
