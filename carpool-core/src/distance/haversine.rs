//! Great-circle distance on a spherical Earth.

use geo::Coord;

/// Mean Earth radius used by [`haversine_km`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two WGS84 coordinates.
///
/// Coordinates use `x = longitude` and `y = latitude`, in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use carpool_core::distance::haversine_km;
///
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let london = Coord { x: -0.1276, y: 51.5072 };
/// let km = haversine_km(paris, london);
/// assert!((km - 343.5).abs() < 1.0);
/// assert_eq!(haversine_km(paris, paris), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point by nature"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let delta_lat = (to.y - from.y).to_radians();
    let delta_lon = (to.x - from.x).to_radians();
    let half_lat = (delta_lat / 2.0).sin();
    let half_lon = (delta_lon / 2.0).sin();
    let a = half_lat * half_lat
        + from.y.to_radians().cos() * to.y.to_radians().cos() * half_lon * half_lon;
    let central_angle = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * central_angle
}
