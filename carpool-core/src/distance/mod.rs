//! Distances between pickup points.
//!
//! The [`DistanceProvider`] trait is the single seam through which the
//! heuristics measure legs between riders. [`GeoDistance`] implements it with
//! the haversine great-circle formula and falls back to a seeded placeholder
//! when either rider lacks coordinates, standing in for a real routing
//! service. [`RouteMetrics`] turns a pickup sequence into distance and
//! duration totals.

mod haversine;
mod metrics;
mod provider;

pub use haversine::{EARTH_RADIUS_KM, haversine_km};
pub use metrics::{AVERAGE_SPEED_KMH, RouteMetrics};
pub use provider::{
    DistanceProvider, GeoDistance, PLACEHOLDER_MAX_KM, PLACEHOLDER_MIN_KM,
};
