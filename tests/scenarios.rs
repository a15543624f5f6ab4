//! End-to-end runs of the assembler over synthetic tracks.

use trailmatch::matcher::{match_direct, match_segment, Strategy};
use trailmatch::{
    resolve_segments, EndpointPolicy, MatchConfig, Point, Provenance, SegmentSpec,
};

fn pt(lat: f64, lon: f64) -> Point {
    Point::new(lat, lon)
}

fn spec(id: &str, start: Point, finish: Point) -> SegmentSpec {
    SegmentSpec {
        id: id.to_string(),
        name: format!("Segment {id}"),
        start_location: "Start".into(),
        finish_location: "Finish".into(),
        distance_miles: 2.5,
        notes: String::new(),
        start,
        finish,
    }
}

/// Out along latitude 0.1, then back along latitude 0 to longitude 0.5.
fn backtrack_track() -> Vec<Point> {
    let outbound = (0..=100).map(|k| pt(0.1, k as f64 * 0.05));
    let back = (10..=99).rev().map(|k| pt(0.0, k as f64 * 0.05));
    outbound.chain(back).collect()
}

#[test]
fn no_track_interpolates_every_segment() {
    let specs = vec![
        spec("1", pt(47.0, 11.0), pt(47.1, 11.1)),
        spec("2", pt(47.1, 11.1), pt(47.2, 11.0)),
        spec("3", pt(47.2, 11.0), pt(47.3, 11.2)),
    ];

    for track in [None, Some(&[][..])] {
        let result = resolve_segments(&specs, track, &MatchConfig::default());

        assert_eq!(result.report.matched, 0);
        assert_eq!(result.report.interpolated, 3);
        assert_eq!(result.report.coverage_percent, 0.0);
        for (seg, spec) in result.segments.iter().zip(&specs) {
            assert_eq!(seg.provenance, Provenance::Interpolated);
            assert_eq!(seg.points.len(), 11);
            assert_eq!(seg.start, spec.start);
            assert_eq!(seg.end, spec.finish);
        }
    }
}

#[test]
fn straight_track_matches_directly() {
    let track: Vec<Point> = (0..100)
        .map(|k| {
            let t = k as f64 / 99.0;
            pt(t, t)
        })
        .collect();
    let specs = vec![spec("half", pt(0.0, 0.0), pt(0.5, 0.5))];

    let result = resolve_segments(&specs, Some(&track[..]), &MatchConfig::default());
    let seg = &result.segments[0];

    assert_eq!(seg.provenance, Provenance::GpsMatched);
    assert_eq!(seg.strategy, Some(Strategy::Direct));
    let ratio = seg.winding_ratio.unwrap();
    assert!((ratio - 1.0).abs() < 0.05, "ratio {ratio}");
    assert_eq!(result.report.coverage_percent, 100.0);
}

#[test]
fn backtrack_rejected_by_direct_strategy() {
    let track = backtrack_track();
    let config = MatchConfig::default();
    let start = pt(0.1, 0.0);
    let end = pt(0.0, 0.5);

    // The nearest point to `end` is at the tail of the return leg,
    // nearly twenty times the straight-line distance away along the track
    assert!(match_direct(&track, &start, &end, &config).is_none());

    let matched = match_segment(&track, &start, &end, &config).unwrap();
    assert_eq!(matched.strategy, Strategy::BestCombination);
    assert_eq!(matched.candidate.start_index, 0);
    assert_eq!(matched.candidate.end_index, 10);
    assert!(matched.candidate.winding_ratio < 1.0);
}

#[test]
fn long_match_is_sampled_to_budget() {
    let track: Vec<Point> = (0..=600)
        .map(|k| pt(k as f64 * 0.001, k as f64 * 0.001))
        .collect();
    let specs = vec![spec("long", track[50], track[549])];
    let config = MatchConfig::default().with_endpoint_policy(EndpointPolicy::KeepGps);

    let result = resolve_segments(&specs, Some(&track[..]), &config);
    let seg = &result.segments[0];

    assert_eq!(seg.provenance, Provenance::GpsMatched);
    assert_eq!(seg.points.len(), 200);
    assert_eq!(seg.points[0], track[50]);
    assert_eq!(seg.points[199], track[549]);
}

#[test]
fn endpoint_policies_differ_only_at_the_ends() {
    let track: Vec<Point> = (0..200).map(|k| pt(0.0, k as f64 * 0.01)).collect();
    let start = pt(0.004, 0.3);
    let finish = pt(-0.004, 1.2);
    let specs = vec![spec("1", start, finish)];

    let snap = MatchConfig::default();
    let keep = MatchConfig::default().with_endpoint_policy(EndpointPolicy::KeepGps);

    let snapped = &resolve_segments(&specs, Some(&track[..]), &snap).segments[0];
    let kept = &resolve_segments(&specs, Some(&track[..]), &keep).segments[0];

    assert_eq!(snapped.start, start);
    assert_eq!(snapped.end, finish);
    assert_eq!(kept.start, track[30]);
    assert_eq!(kept.end, track[120]);

    let n = kept.points.len();
    assert_eq!(snapped.points.len(), n);
    assert_eq!(snapped.points[1..n - 1], kept.points[1..n - 1]);
}

#[test]
fn adjacent_snapped_segments_join_up() {
    let track: Vec<Point> = (0..300).map(|k| pt(0.0, k as f64 * 0.01)).collect();
    let a = pt(0.01, 0.2);
    let b = pt(-0.01, 1.0);
    let c = pt(0.01, 2.5);
    let specs = vec![spec("1", a, b), spec("2", b, c)];

    let result = resolve_segments(&specs, Some(&track[..]), &MatchConfig::default());

    assert_eq!(result.report.matched, 2);
    assert_eq!(result.segments[0].end, result.segments[1].start);
}

#[test]
fn output_order_mirrors_input() {
    let track: Vec<Point> = (0..100).map(|k| pt(0.0, k as f64 * 0.01)).collect();
    let specs = vec![
        spec("far-away", pt(40.0, 40.0), pt(40.0, 40.0)),
        spec("on-track", pt(0.0, 0.1), pt(0.0, 0.6)),
        spec("reverse", pt(0.0, 0.9), pt(0.0, 0.4)),
    ];

    let result = resolve_segments(&specs, Some(&track[..]), &MatchConfig::default());
    let ids: Vec<&str> = result.segments.iter().map(|s| s.id.as_str()).collect();

    assert_eq!(ids, vec!["far-away", "on-track", "reverse"]);
    assert_eq!(result.segments[0].provenance, Provenance::Interpolated);
    assert_eq!(result.segments[2].provenance, Provenance::GpsMatched);
    assert_eq!(result.report.matched, 2);
    assert_eq!(result.report.interpolated, 1);
}

#[test]
fn repeated_runs_are_identical() {
    let track = backtrack_track();
    let specs = vec![
        spec("1", pt(0.1, 0.0), pt(0.0, 0.5)),
        spec("2", pt(0.1, 1.0), pt(0.1, 3.0)),
        spec("3", pt(30.0, 30.0), pt(31.0, 31.0)),
    ];
    let config = MatchConfig::default();

    let first = resolve_segments(&specs, Some(&track[..]), &config);
    let second = resolve_segments(&specs, Some(&track[..]), &config);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
