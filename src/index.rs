//! Nearest-point lookup over an ordered GPS polyline.

use crate::distance::planar_distance;
use crate::gpx::Point;

/// Number of coarse samples taken across the whole track.
const COARSE_SAMPLES: usize = 1000;

/// Minimum half-width of the refinement window around the coarse winner.
const MIN_REFINE_RADIUS: usize = 50;

/// Index of the track point closest to `target` in degree units.
///
/// Two passes: every Nth point is scanned, with
/// N = max(1, len / 1000), then a window of radius max(50, 2N) around
/// the coarse winner is scanned point by point. Ties go to the lowest
/// index. For tracks under 2000 points the coarse pass already visits
/// every point, so the result is the global minimum.
///
/// The track must be non-empty; an empty track returns 0.
pub fn find_nearest_index(track: &[Point], target: &Point) -> usize {
    if track.len() <= 1 {
        return 0;
    }

    let stride = (track.len() / COARSE_SAMPLES).max(1);

    let mut coarse = 0;
    let mut coarse_dist = f64::INFINITY;
    for i in (0..track.len()).step_by(stride) {
        let d = planar_distance(&track[i], target);
        if d < coarse_dist {
            coarse_dist = d;
            coarse = i;
        }
    }

    let radius = MIN_REFINE_RADIUS.max(2 * stride);
    let lo = coarse.saturating_sub(radius);
    let hi = (coarse + radius).min(track.len() - 1);

    let mut best = coarse;
    let mut best_dist = f64::INFINITY;
    for (i, p) in track.iter().enumerate().take(hi + 1).skip(lo) {
        let d = planar_distance(p, target);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }

    best
}

/// Every track index within `max_distance` of `target`, nearest first.
///
/// Full linear scan. Equal distances keep track order. Callers truncate
/// the result before feeding it to anything combinatorial.
pub fn find_nearby_indices(track: &[Point], target: &Point, max_distance: f64) -> Vec<(usize, f64)> {
    let mut nearby: Vec<(usize, f64)> = track
        .iter()
        .enumerate()
        .map(|(i, p)| (i, planar_distance(p, target)))
        .filter(|&(_, d)| d <= max_distance)
        .collect();

    nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
    nearby
}
