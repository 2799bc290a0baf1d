use geo::{GeodesicDistance, Point};

use crate::core::regions::{resolve_region, Coordinates};

/// Geodesic distance between two coordinates in kilometers
///
/// Uses Karney's algorithm on the WGS-84 ellipsoid. The endpoints are put in a
/// canonical order first so the result is bit-for-bit symmetric.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    if a == b {
        return 0.0;
    }

    let (from, to) = if (a.latitude, a.longitude) <= (b.latitude, b.longitude) {
        (a, b)
    } else {
        (b, a)
    };

    let from = Point::new(from.longitude, from.latitude);
    let to = Point::new(to.longitude, to.latitude);

    from.geodesic_distance(&to) / 1000.0
}

/// Distance between two named regions, `None` if either is not in the table
pub fn region_distance_km(from: &str, to: &str) -> Option<f64> {
    let a = resolve_region(from)?;
    let b = resolve_region(to)?;
    Some(distance_km(a, b))
}
