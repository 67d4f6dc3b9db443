//! Great-circle distance between coordinate pairs.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points on a spherical Earth.
#[must_use]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance with the degenerate-input policy applied: any unset coordinate
/// resolves to a distance of 0.0 rather than an error.
///
/// Plan loading rejects locations without coordinates, so the engine itself
/// always calls [`haversine_km`] directly. This wrapper exists for callers
/// holding optional coordinates (ad-hoc tooling, partially populated rows)
/// and pins down the missing-coordinate behavior.
#[must_use]
pub fn distance_km(
    lat1: Option<f64>,
    lng1: Option<f64>,
    lat2: Option<f64>,
    lng2: Option<f64>,
) -> f64 {
    match (lat1, lng1, lat2, lng2) {
        (Some(a), Some(b), Some(c), Some(d)) => haversine_km(a, b, c, d),
        _ => 0.0,
    }
}
