//! Elevation profile of a resolved path.
//!
//! Produces the data series for an elevation chart: distance along the
//! path against recorded elevation. Points without elevation (all of an
//! interpolated path, for instance) are skipped but still count toward
//! the distance.

use serde::Serialize;

use crate::distance::cumulative_meters;
use crate::gpx::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileSample {
    pub distance_m: f64,
    pub elevation_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationProfile {
    pub samples: Vec<ProfileSample>,
    pub ascent_m: f64,
    pub descent_m: f64,
}

impl ElevationProfile {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min_elevation(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.elevation_m).reduce(f64::min)
    }

    pub fn max_elevation(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.elevation_m).reduce(f64::max)
    }
}

/// Build the elevation profile of `points`.
pub fn elevation_profile(points: &[Point]) -> ElevationProfile {
    let along = cumulative_meters(points);

    let samples: Vec<ProfileSample> = points
        .iter()
        .zip(along)
        .filter_map(|(p, distance_m)| {
            p.ele.map(|elevation_m| ProfileSample {
                distance_m,
                elevation_m,
            })
        })
        .collect();

    let mut ascent_m = 0.0;
    let mut descent_m = 0.0;
    for w in samples.windows(2) {
        let delta = w[1].elevation_m - w[0].elevation_m;
        if delta > 0.0 {
            ascent_m += delta;
        } else {
            descent_m -= delta;
        }
    }

    ElevationProfile {
        samples,
        ascent_m,
        descent_m,
    }
}
