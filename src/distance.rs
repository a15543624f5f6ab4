//! Distance computations.
//!
//! Two metrics live here. `planar_distance` works in raw degrees and is
//! only a cheap closeness proxy for searching; `haversine` is the true
//! great-circle distance in meters. All coordinates use WGS84.

use crate::gpx::Point;

/// Earth radius in meters (WGS84 mean).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Euclidean distance in degree units, `sqrt(dLat² + dLon²)`.
///
/// Not a metric distance: a degree of longitude shrinks with latitude.
pub fn planar_distance(a: &Point, b: &Point) -> f64 {
    let dlat = b.lat - a.lat;
    let dlon = b.lon - a.lon;
    (dlat * dlat + dlon * dlon).sqrt()
}

/// Haversine distance between two points in meters.
pub fn haversine(a: &Point, b: &Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Length of a polyline in degree units. Zero for fewer than 2 points.
pub fn path_length_degrees(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| planar_distance(&w[0], &w[1]))
        .sum()
}

/// Running haversine distance along a polyline, in meters.
///
/// Same length as the input; the first entry is 0.
pub fn cumulative_meters(points: &[Point]) -> Vec<f64> {
    let mut total = 0.0;
    let mut out = Vec::with_capacity(points.len());

    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += haversine(&points[i - 1], p);
        }
        out.push(total);
    }

    out
}

/// Total length of a track in meters.
pub fn track_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine(&w[0], &w[1]))
        .sum()
}

/// Ratio of a path's length to the straight line between `start` and `end`.
///
/// Both lengths are in degree units. Returns `None` when `start` and
/// `end` coincide, since the ratio is undefined there.
pub fn winding_ratio(points: &[Point], start: &Point, end: &Point) -> Option<f64> {
    let straight = planar_distance(start, end);
    if straight <= f64::EPSILON {
        return None;
    }
    Some(path_length_degrees(points) / straight)
}
