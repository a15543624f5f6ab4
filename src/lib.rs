pub mod android_jni;
pub mod assemble;
pub mod config;
pub mod distance;
pub mod error;
pub mod gpx;
pub mod index;
pub mod interpolate;
pub mod matcher;
pub mod profile;
pub mod sample;
pub mod segments;

pub use assemble::{resolve_segments, Assembly, AssemblyReport, Provenance, ResolvedSegment};
pub use config::{EndpointPolicy, MatchConfig};
pub use error::{Error, Result};
pub use crate::gpx::{Point, Track};
pub use segments::{parse_segments, SegmentSpec};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
