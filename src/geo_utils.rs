//! Geographic utilities: distance, bounds and center calculations.

use crate::{Bounds, GpsPoint};

/// Mean Earth radius in meters used by [`haversine_distance`].
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (spherical Earth).
///
/// Symmetric, zero for identical points. Any finite latitude/longitude is
/// accepted; sentinel detection is the classifier's job.
///
/// # Example
/// ```
/// use trackaudit::GpsPoint;
/// use trackaudit::geo_utils::haversine_distance;
///
/// let tokyo = GpsPoint::new(35.6812, 139.7671);
/// let osaka = GpsPoint::new(34.7025, 135.4959);
/// let d = haversine_distance(&tokyo, &osaka);
/// assert!(d > 395_000.0 && d < 410_000.0);
/// ```
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlng = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Sum of consecutive haversine distances along a polyline.
pub fn polyline_length(points: &[GpsPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Compute the bounding box of a set of points.
///
/// Returns inverted (MAX/MIN) bounds for an empty slice; use
/// [`Bounds::from_points`] when emptiness matters.
pub fn compute_bounds(points: &[GpsPoint]) -> Bounds {
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.latitude);
        max_lat = max_lat.max(p.latitude);
        min_lng = min_lng.min(p.longitude);
        max_lng = max_lng.max(p.longitude);
    }

    Bounds {
        min_lat,
        max_lat,
        min_lng,
        max_lng,
    }
}

/// Arithmetic mean of the points. (0, 0) for an empty slice.
pub fn compute_center(points: &[GpsPoint]) -> GpsPoint {
    if points.is_empty() {
        return GpsPoint::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.latitude).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.longitude).sum::<f64>() / n;
    GpsPoint::new(lat, lng)
}
