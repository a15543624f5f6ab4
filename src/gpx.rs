//! GPS points, recorded tracks, and GPX 1.1 ingestion.
//!
//! Wraps the `gpx` crate and reduces a file to the single ordered
//! polyline the matcher works against.

use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::error::Result;

/// A geographic coordinate with optional elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ele: Option<f64>,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Point { lat, lon, ele: None }
    }

    /// Latitude within [-90, 90], longitude within [-180, 180], both finite.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// One recorded track, points in traversal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<Point>,
}

impl Track {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn to_point(wp: &gpx::Waypoint) -> Point {
    Point {
        lat: wp.point().y(),
        lon: wp.point().x(),
        ele: wp.elevation,
    }
}

/// Parse a GPX file and pick the track to match against.
///
/// The first `<trk>` with any points wins; its segments are flattened
/// in order. Files that only carry a planned `<rte>` fall back to the
/// first route with points. A file with neither yields an empty track.
pub fn parse<R: Read>(reader: R) -> Result<Track> {
    let gpx = gpx::read(reader)?;

    let recorded = gpx.tracks.iter().find_map(|t| {
        let points: Vec<Point> = t
            .segments
            .iter()
            .flat_map(|seg| seg.points.iter())
            .map(to_point)
            .collect();

        (!points.is_empty()).then(|| Track {
            name: t.name.clone(),
            points,
        })
    });

    if let Some(track) = recorded {
        return Ok(track);
    }

    let planned = gpx.routes.iter().find(|r| !r.points.is_empty()).map(|r| Track {
        name: r.name.clone(),
        points: r.points.iter().map(to_point).collect(),
    });

    Ok(planned.unwrap_or(Track {
        name: None,
        points: Vec::new(),
    }))
}

/// Load a track from raw bytes, treating anything unusable as "no track".
///
/// Empty input, malformed GPX, and files without points all return
/// `None`; segments are then resolved by interpolation alone.
pub fn load_track(data: &[u8]) -> Option<Track> {
    if data.is_empty() {
        log::warn!("no GPS data supplied, segments will be interpolated");
        return None;
    }

    match parse(data) {
        Ok(track) if !track.is_empty() => {
            log::debug!("loaded GPS track with {} points", track.points.len());
            Some(track)
        }
        Ok(_) => {
            log::warn!("GPX file contains no track points, segments will be interpolated");
            None
        }
        Err(e) => {
            log::warn!("{e}, segments will be interpolated");
            None
        }
    }
}
