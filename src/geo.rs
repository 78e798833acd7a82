use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees. Pure value type, no identity
/// beyond its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance between two points on a spherical Earth, in meters.
///
/// Inputs are trusted (no range validation). Returns 0 for identical points.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi_a = a.lat.to_radians();
    let phi_b = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);

    // Rounding can push sqrt(h) a hair above 1.0 for near-antipodal pairs,
    // which would make asin return NaN.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_METERS * c
}

/// Parse a `"lat,lon"` geotag string.
///
/// Returns `None` on missing/blank input, wrong field count, or
/// non-numeric fields. Malformed geotags are a normal condition for
/// user-entered data, not an error.
pub fn parse_geotag(raw: Option<&str>) -> Option<GeoPoint> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let mut fields = raw.splitn(3, ',');
    let lat = fields.next()?.trim().parse::<f64>().ok()?;
    let lon = fields.next()?.trim().parse::<f64>().ok()?;
    if fields.next().is_some() {
        return None;
    }

    Some(GeoPoint { lat, lon })
}
