//! Straight-line paths for segments without a usable GPS match.

use crate::gpx::Point;

/// Evenly spaced points from `start` to `end` in lat/lon space.
///
/// Produces `steps + 1` points. The first and last are exactly `start`
/// and `end`; no geodesic correction is applied in between.
pub fn interpolate(start: &Point, end: &Point, steps: usize) -> Vec<Point> {
    if steps == 0 {
        return vec![*start];
    }

    let mut out = Vec::with_capacity(steps + 1);
    out.push(*start);
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        out.push(Point::new(
            start.lat + (end.lat - start.lat) * t,
            start.lon + (end.lon - start.lon) * t,
        ));
    }
    out.push(*end);

    out
}
