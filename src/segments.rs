//! Trail segment definitions.
//!
//! Segments arrive as hand-authored JSON. Each names a stretch of trail
//! and gives rough start and finish coordinates. Everything is
//! validated here, before matching starts.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gpx::Point;

/// A validated segment definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSpec {
    pub id: String,
    pub name: String,
    pub start_location: String,
    pub finish_location: String,
    /// Declared nominal distance in miles.
    pub distance_miles: f64,
    pub notes: String,
    /// Approximate start coordinate.
    pub start: Point,
    /// Approximate finish coordinate.
    pub finish: Point,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    start_location: String,
    #[serde(default)]
    finish_location: String,
    #[serde(default)]
    distance_miles: f64,
    #[serde(default)]
    notes: String,
    start: Option<Point>,
    finish: Option<Point>,
}

fn check_coordinate(segment: &str, field: &'static str, point: Option<Point>) -> Result<Point> {
    let point = point.ok_or_else(|| Error::MissingCoordinate {
        segment: segment.to_string(),
        field,
    })?;

    if !point.is_valid() {
        return Err(Error::InvalidCoordinate {
            segment: segment.to_string(),
            field,
            lat: point.lat,
            lon: point.lon,
        });
    }

    Ok(point)
}

impl RawSegment {
    fn validate(self, position: usize) -> Result<SegmentSpec> {
        let id = self.id.unwrap_or_else(|| (position + 1).to_string());
        let label = if self.name.is_empty() { id.clone() } else { self.name.clone() };

        let start = check_coordinate(&label, "start", self.start)?;
        let finish = check_coordinate(&label, "finish", self.finish)?;

        Ok(SegmentSpec {
            id,
            name: self.name,
            start_location: self.start_location,
            finish_location: self.finish_location,
            distance_miles: self.distance_miles,
            notes: self.notes,
            start,
            finish,
        })
    }
}

/// Parse and validate a JSON array of segment definitions.
///
/// Segments without an `id` get their 1-based position. Order is kept.
pub fn parse_segments(json: &str) -> Result<Vec<SegmentSpec>> {
    let raw: Vec<RawSegment> = serde_json::from_str(json).map_err(Error::SegmentJson)?;

    raw.into_iter()
        .enumerate()
        .map(|(i, seg)| seg.validate(i))
        .collect()
}
