use geographiclib_rs::{Geodesic, InverseGeodesic};

use crate::coasts::{SEA_COASTS, SeaCoast};

#[derive(Debug, Clone, PartialEq)]
pub struct NearestCoast {
    pub name: &'static str,
    pub distance_km: f64,
}

/// Nearest entry of [`SEA_COASTS`] to `(lat, lon)`.
pub fn nearest_sea_coast(lat: f64, lon: f64) -> Option<NearestCoast> {
    nearest_in(&SEA_COASTS, lat, lon)
}

/// Linear scan for the coast with the smallest WGS-84 geodesic distance.
///
/// Only a strictly smaller distance replaces the current best, so ties keep
/// the earlier entry. Returns `None` for an empty list, non-finite input or a
/// latitude outside [-90, 90].
pub fn nearest_in(coasts: &[SeaCoast], lat: f64, lon: f64) -> Option<NearestCoast> {
    if !valid_coordinates(lat, lon) {
        return None;
    }
    let geod = Geodesic::wgs84();
    let mut best: Option<NearestCoast> = None;
    for c in coasts {
        let metres: f64 = geod.inverse(lat, lon, c.lat, c.lon);
        let distance_km = metres / 1000.0;
        if best.as_ref().is_none_or(|b| distance_km < b.distance_km) {
            best = Some(NearestCoast {
                name: c.name,
                distance_km,
            });
        }
    }
    best
}

/// Finite coordinates with a latitude on the globe. Longitude wraps.
pub fn valid_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && lon.is_finite()
}
