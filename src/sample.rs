//! Downsampling of overlong matched paths.

use crate::gpx::Point;

/// Reduce `points` to exactly `target_count` points, keeping both ends.
///
/// Inputs already within budget are returned unchanged. Intermediate
/// slot `i` takes the point at `round(i * step)` with
/// `step = (len - 1) / (target_count - 1)`.
pub fn sample(points: &[Point], target_count: usize) -> Vec<Point> {
    if points.len() <= target_count {
        return points.to_vec();
    }
    if target_count < 2 {
        return points.iter().take(target_count).copied().collect();
    }

    let last = points.len() - 1;
    let step = last as f64 / (target_count - 1) as f64;

    let mut out = Vec::with_capacity(target_count);
    out.push(points[0]);
    for i in 1..target_count - 1 {
        let idx = ((i as f64 * step).round() as usize).min(last);
        out.push(points[idx]);
    }
    out.push(points[last]);

    out
}
