//! Matching parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do with the ends of an accepted GPS match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointPolicy {
    /// Replace the first and last matched points with the segment's
    /// declared start and finish, so adjacent segments join up.
    #[default]
    SnapToTarget,
    /// Leave the recorded GPS endpoints untouched.
    KeepGps,
}

/// Tunables for matching segments against a track.
///
/// Distances suffixed `_deg` are raw degree units as measured by
/// [`crate::distance::planar_distance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum distance between a declared endpoint and its nearest
    /// track point. Also the search radius for candidate endpoints.
    pub endpoint_tolerance_deg: f64,
    /// How many nearby candidates per endpoint are paired up.
    pub combination_candidates: usize,
    /// Exclusive lower bound on path length / straight-line length.
    pub min_winding_ratio: f64,
    /// Exclusive upper bound on path length / straight-line length.
    pub max_winding_ratio: f64,
    /// Matched paths longer than this are downsampled...
    pub sample_threshold: usize,
    /// ...to this many points.
    pub sample_target: usize,
    /// Degree-to-meter factor for the distance-budget search.
    pub meters_per_degree: f64,
    /// Accepted relative error between a stretch's length and the budget.
    pub budget_relative_error: f64,
    /// Minimum index span of a distance-budget candidate.
    pub budget_min_span: usize,
    /// Steps of a synthesized straight path (points = steps + 1).
    pub interpolation_steps: usize,
    pub endpoint_policy: EndpointPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            endpoint_tolerance_deg: 3.0,
            combination_candidates: 5,
            min_winding_ratio: 0.5,
            max_winding_ratio: 10.0,
            sample_threshold: 300,
            sample_target: 200,
            meters_per_degree: 111_000.0,
            budget_relative_error: 0.5,
            budget_min_span: 10,
            interpolation_steps: 10,
            endpoint_policy: EndpointPolicy::default(),
        }
    }
}

impl MatchConfig {
    /// Read a config from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::ConfigJson)
    }

    pub fn with_endpoint_policy(mut self, policy: EndpointPolicy) -> Self {
        self.endpoint_policy = policy;
        self
    }
}
