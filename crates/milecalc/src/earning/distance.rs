use super::domain::Coordinates;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Coordinate outside the latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("coordinate out of range (lat {latitude}, lon {longitude})")]
pub struct OutOfRangeCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Haversine great-circle distance in statute miles.
pub fn great_circle_miles(from: Coordinates, to: Coordinates) -> Result<f64, OutOfRangeCoordinate> {
    for point in [from, to] {
        if !point.is_valid() {
            return Err(OutOfRangeCoordinate {
                latitude: point.latitude,
                longitude: point.longitude,
            });
        }
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1].
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().asin();

    Ok(EARTH_RADIUS_MILES * c)
}
