//! Segment matching against a recorded track.
//!
//! A segment is declared only by approximate start and finish
//! coordinates. Matching finds the stretch of the track that runs
//! between them. Strategies are tried in [`Strategy::ORDER`]; the first
//! one producing a candidate that passes the winding test wins.
//!
//! The winding test compares the candidate's length with the straight
//! line between the declared endpoints. A real trail winds a little,
//! but a stretch many times longer than the crow-flies distance is a
//! match against some unrelated part of the recording.

use serde::Serialize;

use crate::config::{EndpointPolicy, MatchConfig};
use crate::distance::{cumulative_meters, planar_distance, winding_ratio};
use crate::gpx::Point;
use crate::index::{find_nearby_indices, find_nearest_index};
use crate::sample::sample;

/// The matching strategies, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Nearest track point to each endpoint.
    Direct,
    /// Best-scoring pairing of several nearby points per endpoint.
    BestCombination,
    /// First stretch whose length is close to the straight-line distance.
    DistanceBudget,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [
        Strategy::Direct,
        Strategy::BestCombination,
        Strategy::DistanceBudget,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::BestCombination => "best-combination",
            Strategy::DistanceBudget => "distance-budget",
        }
    }

    /// Run this strategy alone.
    pub fn run(
        self,
        track: &[Point],
        start: &Point,
        end: &Point,
        config: &MatchConfig,
    ) -> Option<MatchCandidate> {
        match self {
            Strategy::Direct => match_direct(track, start, end, config),
            Strategy::BestCombination => match_best_combination(track, start, end, config),
            Strategy::DistanceBudget => match_distance_budget(track, start, end, config),
        }
    }
}

/// A stretch of the track that passed the winding test.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// Track index the path starts from.
    pub start_index: usize,
    /// Track index the path ends at. Lower than `start_index` when the
    /// segment runs against the recording direction.
    pub end_index: usize,
    /// Path from start to end, already downsampled if it was overlong.
    pub points: Vec<Point>,
    pub winding_ratio: f64,
}

/// The accepted candidate and the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPath {
    pub strategy: Strategy,
    pub candidate: MatchCandidate,
}

impl MatchedPath {
    /// Final path to render, with endpoints handled per `policy`.
    ///
    /// Snapping moves only latitude and longitude; the recorded
    /// elevation of the replaced point is kept.
    pub fn into_points(self, start: &Point, end: &Point, policy: EndpointPolicy) -> Vec<Point> {
        let mut points = self.candidate.points;

        if policy == EndpointPolicy::SnapToTarget {
            if let Some(first) = points.first_mut() {
                first.lat = start.lat;
                first.lon = start.lon;
            }
            if let Some(last) = points.last_mut() {
                last.lat = end.lat;
                last.lon = end.lon;
            }
        }

        points
    }
}

/// Find the track stretch between `start` and `end`.
///
/// Returns `None` when no strategy yields an acceptable candidate,
/// including when the track is empty.
pub fn match_segment(
    track: &[Point],
    start: &Point,
    end: &Point,
    config: &MatchConfig,
) -> Option<MatchedPath> {
    if track.is_empty() {
        return None;
    }

    for strategy in Strategy::ORDER {
        if let Some(candidate) = strategy.run(track, start, end, config) {
            log::debug!(
                "{} match: indices {}..{}, winding ratio {:.2}",
                strategy.name(),
                candidate.start_index,
                candidate.end_index,
                candidate.winding_ratio
            );
            return Some(MatchedPath {
                strategy,
                candidate,
            });
        }
        log::debug!("{} match found nothing acceptable", strategy.name());
    }

    None
}

/// Whether a winding ratio lies strictly inside the accepted band.
pub fn accepts_winding_ratio(ratio: f64, config: &MatchConfig) -> bool {
    ratio > config.min_winding_ratio && ratio < config.max_winding_ratio
}

/// Winding test on a raw path.
///
/// Overlong paths are sampled first; the ratio is measured on what
/// would actually be rendered. Returns the kept points and the ratio.
pub fn winding_test(
    raw: Vec<Point>,
    start: &Point,
    end: &Point,
    config: &MatchConfig,
) -> Option<(Vec<Point>, f64)> {
    if raw.len() < 2 {
        return None;
    }

    let points = if raw.len() > config.sample_threshold {
        sample(&raw, config.sample_target)
    } else {
        raw
    };

    let ratio = winding_ratio(&points, start, end)?;
    accepts_winding_ratio(ratio, config).then_some((points, ratio))
}

/// Track points from index `from` to `to` inclusive, in travel order.
fn extract(track: &[Point], from: usize, to: usize) -> Vec<Point> {
    if from <= to {
        track[from..=to].to_vec()
    } else {
        track[to..=from].iter().rev().copied().collect()
    }
}

fn candidate(
    track: &[Point],
    from: usize,
    to: usize,
    start: &Point,
    end: &Point,
    config: &MatchConfig,
) -> Option<MatchCandidate> {
    let (points, winding_ratio) = winding_test(extract(track, from, to), start, end, config)?;
    Some(MatchCandidate {
        start_index: from,
        end_index: to,
        points,
        winding_ratio,
    })
}

/// Nearest track point to each endpoint, both within tolerance.
pub fn match_direct(
    track: &[Point],
    start: &Point,
    end: &Point,
    config: &MatchConfig,
) -> Option<MatchCandidate> {
    if track.is_empty() {
        return None;
    }

    let from = find_nearest_index(track, start);
    let to = find_nearest_index(track, end);

    let start_dist = planar_distance(&track[from], start);
    let end_dist = planar_distance(&track[to], end);
    if start_dist > config.endpoint_tolerance_deg || end_dist > config.endpoint_tolerance_deg {
        return None;
    }

    candidate(track, from, to, start, end, config)
}

/// Pair up the nearest few points of each endpoint.
///
/// Among pairs passing the winding test, the one with the smallest sum
/// of endpoint distances wins; ties keep the first pair found.
pub fn match_best_combination(
    track: &[Point],
    start: &Point,
    end: &Point,
    config: &MatchConfig,
) -> Option<MatchCandidate> {
    let mut starts = find_nearby_indices(track, start, config.endpoint_tolerance_deg);
    let mut ends = find_nearby_indices(track, end, config.endpoint_tolerance_deg);
    starts.truncate(config.combination_candidates);
    ends.truncate(config.combination_candidates);

    let mut best: Option<(f64, MatchCandidate)> = None;

    for &(from, start_dist) in &starts {
        for &(to, end_dist) in &ends {
            if from == to {
                continue;
            }
            let Some(found) = candidate(track, from, to, start, end, config) else {
                continue;
            };

            let score = start_dist + end_dist;
            if best.as_ref().map_or(true, |(best_score, _)| score < *best_score) {
                best = Some((score, found));
            }
        }
    }

    best.map(|(_, found)| found)
}

/// First stretch whose measured length is near the straight-line distance.
///
/// The target length is the degree distance between the endpoints
/// times `meters_per_degree`. Pairs are visited in (i, j) order with
/// `j >= i + budget_min_span`. Quadratic in the track length.
pub fn match_distance_budget(
    track: &[Point],
    start: &Point,
    end: &Point,
    config: &MatchConfig,
) -> Option<MatchCandidate> {
    let target_m = planar_distance(start, end) * config.meters_per_degree;
    if target_m <= 0.0 {
        return None;
    }

    let cumulative = cumulative_meters(track);
    let ceiling = target_m * (1.0 + config.budget_relative_error);

    for i in 0..track.len() {
        for j in (i + config.budget_min_span)..track.len() {
            let span = cumulative[j] - cumulative[i];
            if span > ceiling {
                // Cumulative distance never decreases
                break;
            }
            if (span - target_m).abs() / target_m > config.budget_relative_error {
                continue;
            }
            if let Some(found) = candidate(track, i, j, start, end, config) {
                return Some(found);
            }
        }
    }

    None
}
