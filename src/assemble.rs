//! Resolving every segment of a trail against one recorded track.

use serde::Serialize;

use crate::config::MatchConfig;
use crate::distance::track_length;
use crate::gpx::Point;
use crate::interpolate::interpolate;
use crate::matcher::{match_segment, Strategy};
use crate::profile::{elevation_profile, ElevationProfile};
use crate::sample::sample;
use crate::segments::SegmentSpec;

/// Where a resolved path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    GpsMatched,
    Interpolated,
}

/// A segment ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSegment {
    pub id: String,
    pub name: String,
    pub start_location: String,
    pub finish_location: String,
    pub distance_miles: f64,
    pub notes: String,
    pub points: Vec<Point>,
    /// First point of `points`.
    pub start: Point,
    /// Last point of `points`.
    pub end: Point,
    pub provenance: Provenance,
    /// Haversine length of `points` in meters.
    pub measured_distance_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winding_ratio: Option<f64>,
    /// Present when the path carries recorded elevation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ElevationProfile>,
}

/// How many segments were matched to GPS versus interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssemblyReport {
    pub matched: usize,
    pub interpolated: usize,
    pub total: usize,
    pub coverage_percent: f64,
}

/// Result of one run: segments in input order plus the tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assembly {
    pub segments: Vec<ResolvedSegment>,
    pub report: AssemblyReport,
}

fn resolve_one(spec: &SegmentSpec, track: &[Point], config: &MatchConfig) -> ResolvedSegment {
    let matched = match_segment(track, &spec.start, &spec.finish, config);

    let (points, provenance, strategy, winding_ratio) = match matched {
        Some(path) => {
            let strategy = path.strategy;
            let ratio = path.candidate.winding_ratio;
            let points = path.into_points(&spec.start, &spec.finish, config.endpoint_policy);
            let points = if points.len() > config.sample_threshold {
                sample(&points, config.sample_target)
            } else {
                points
            };
            (points, Provenance::GpsMatched, Some(strategy), Some(ratio))
        }
        None => {
            let points = interpolate(&spec.start, &spec.finish, config.interpolation_steps);
            (points, Provenance::Interpolated, None, None)
        }
    };

    let measured_distance_m = track_length(&points);
    let start = points.first().copied().unwrap_or(spec.start);
    let end = points.last().copied().unwrap_or(spec.finish);
    let profile = Some(elevation_profile(&points)).filter(|p| !p.is_empty());

    log::debug!(
        "segment {} '{}': {:?}, {} points, {:.0} m",
        spec.id,
        spec.name,
        provenance,
        points.len(),
        measured_distance_m
    );

    ResolvedSegment {
        id: spec.id.clone(),
        name: spec.name.clone(),
        start_location: spec.start_location.clone(),
        finish_location: spec.finish_location.clone(),
        distance_miles: spec.distance_miles,
        notes: spec.notes.clone(),
        points,
        start,
        end,
        provenance,
        measured_distance_m,
        strategy,
        winding_ratio,
        profile,
    }
}

/// Resolve every segment in order.
///
/// With no track, or an empty one, every segment is interpolated. The
/// output has exactly one entry per input, in the same order.
pub fn resolve_segments(
    specs: &[SegmentSpec],
    track: Option<&[Point]>,
    config: &MatchConfig,
) -> Assembly {
    let track = track.unwrap_or(&[]);

    let segments: Vec<ResolvedSegment> = specs
        .iter()
        .map(|spec| resolve_one(spec, track, config))
        .collect();

    let matched = segments
        .iter()
        .filter(|s| s.provenance == Provenance::GpsMatched)
        .count();
    let total = segments.len();
    let coverage_percent = if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    };

    let report = AssemblyReport {
        matched,
        interpolated: total - matched,
        total,
        coverage_percent,
    };

    log::info!(
        "resolved {} segments: {} GPS-matched, {} interpolated ({:.0}% coverage)",
        total,
        report.matched,
        report.interpolated,
        coverage_percent
    );

    Assembly { segments, report }
}
