//! JNI bindings for the Android app.
//!
//! Each public function here corresponds to a `external fun` declaration
//! in RustBridge.kt. The function names follow JNI naming conventions:
//! Java_<package>_<class>_<method> with dots replaced by underscores.

use jni::JNIEnv;
use jni::objects::{JByteArray, JClass, JString};
use jni::sys::jstring;

use crate::assemble::resolve_segments;
use crate::config::MatchConfig;
use crate::error::{Error, Result};
use crate::gpx::load_track;
use crate::segments::parse_segments;

/// Resolve segments from raw inputs and return the assembly as JSON.
///
/// `gpx` may be empty or unreadable; every segment is then interpolated.
/// An absent or blank `config_json` means default settings.
pub fn resolve_json(gpx: &[u8], segments_json: &str, config_json: Option<&str>) -> Result<String> {
    let config = match config_json {
        Some(json) if !json.trim().is_empty() => MatchConfig::from_json(json)?,
        _ => MatchConfig::default(),
    };
    let specs = parse_segments(segments_json)?;
    let track = load_track(gpx);

    let assembly = resolve_segments(&specs, track.as_ref().map(|t| t.points.as_slice()), &config);
    serde_json::to_string(&assembly).map_err(Error::Serialize)
}

/// Returns the rust-core library version.
/// Maps to: RustBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_trailmatch_app_RustBridge_version(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    let version = crate::VERSION;
    env.new_string(version)
        .expect("failed to create Java string")
        .into_raw()
}

/// Installs the Android logger. Safe to call more than once.
/// Maps to: RustBridge.initLogging()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_trailmatch_app_RustBridge_initLogging(
    _env: JNIEnv,
    _class: JClass,
) {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("TrailMatch"),
    );
}

fn read_inputs(
    env: &mut JNIEnv,
    gpx: &JByteArray,
    segments_json: &JString,
    config_json: &JString,
) -> jni::errors::Result<(Vec<u8>, String, Option<String>)> {
    let gpx = if gpx.is_null() {
        Vec::new()
    } else {
        env.convert_byte_array(gpx)?
    };
    let segments: String = env.get_string(segments_json)?.into();
    let config = if config_json.is_null() {
        None
    } else {
        Some(env.get_string(config_json)?.into())
    };
    Ok((gpx, segments, config))
}

/// Matches every segment against the GPX track.
/// Maps to: RustBridge.resolveSegments(ByteArray, String, String?) -> String
///
/// Invalid segment or config JSON throws IllegalArgumentException.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_trailmatch_app_RustBridge_resolveSegments<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    gpx: JByteArray<'local>,
    segments_json: JString<'local>,
    config_json: JString<'local>,
) -> jstring {
    let (gpx, segments, config) = match read_inputs(&mut env, &gpx, &segments_json, &config_json) {
        Ok(inputs) => inputs,
        Err(e) => {
            log::error!("failed to read arguments from the JVM: {e}");
            return std::ptr::null_mut();
        }
    };

    match resolve_json(&gpx, &segments, config.as_deref()) {
        Ok(json) => match env.new_string(json) {
            Ok(s) => s.into_raw(),
            Err(e) => {
                log::error!("failed to create Java string: {e}");
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            log::warn!("rejected segment input: {e}");
            if let Err(throw_err) = env.throw_new("java/lang/IllegalArgumentException", e.to_string()) {
                log::error!("failed to throw IllegalArgumentException: {throw_err}");
            }
            std::ptr::null_mut()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpx_line(n: usize) -> String {
        let points: String = (0..n)
            .map(|i| {
                let lon = 11.0 + i as f64 * 0.01;
                format!(r#"<trkpt lat="47.0" lon="{lon:.2}"><ele>{}</ele></trkpt>"#, 600 + i)
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><name>Ridge</name><trkseg>{points}</trkseg></trk>
</gpx>"#
        )
    }

    const SEGMENTS: &str = r#"[
      {"id": "a", "name": "Climb", "start": {"lat": 47.0, "lon": 11.0}, "finish": {"lat": 47.0, "lon": 11.05}}
    ]"#;

    #[test]
    fn resolve_json_matches_gpx() {
        let json = resolve_json(gpx_line(11).as_bytes(), SEGMENTS, None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let seg = &parsed["segments"][0];
        assert_eq!(seg["id"], "a");
        assert_eq!(seg["provenance"], "gps-matched");
        assert_eq!(seg["strategy"], "direct");
        assert_eq!(seg["points"].as_array().unwrap().len(), 6);
        assert_eq!(parsed["report"]["matched"], 1);
        assert_eq!(parsed["report"]["coverage_percent"], 100.0);
    }

    #[test]
    fn resolve_json_without_gpx_interpolates() {
        let json = resolve_json(&[], SEGMENTS, Some("")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["segments"][0]["provenance"], "interpolated");
        assert_eq!(parsed["segments"][0]["points"].as_array().unwrap().len(), 11);
        assert!(parsed["segments"][0].get("strategy").is_none());
        assert_eq!(parsed["report"]["interpolated"], 1);
    }

    #[test]
    fn resolve_json_applies_config() {
        let config = r#"{"interpolation_steps": 4}"#;
        let json = resolve_json(b"garbage", SEGMENTS, Some(config)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["segments"][0]["points"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn resolve_json_rejects_bad_segments() {
        let bad = r#"[{"name": "Half", "start": {"lat": 47.0, "lon": 11.0}}]"#;
        let err = resolve_json(&[], bad, None).unwrap_err();
        assert!(matches!(err, Error::MissingCoordinate { .. }));
    }

    #[test]
    fn resolve_json_rejects_bad_config() {
        let err = resolve_json(&[], SEGMENTS, Some(r#"{"sample_target": "many"}"#)).unwrap_err();
        assert!(matches!(err, Error::ConfigJson(_)));
    }
}
