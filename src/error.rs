//! Error type for ingestion and serialization.
//!
//! The matching core never fails; only the edges that read segment
//! definitions, GPX bytes, or configuration, and the step that writes
//! JSON back out, can return an error.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("GPX parse error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("invalid segment JSON: {0}")]
    SegmentJson(#[source] serde_json::Error),

    #[error("invalid config JSON: {0}")]
    ConfigJson(#[source] serde_json::Error),

    #[error("JSON serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("segment '{segment}' is missing its {field} coordinate")]
    MissingCoordinate { segment: String, field: &'static str },

    #[error("segment '{segment}' has an invalid {field} coordinate ({lat}, {lon})")]
    InvalidCoordinate {
        segment: String,
        field: &'static str,
        lat: f64,
        lon: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
