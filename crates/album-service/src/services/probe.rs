//! ffprobe-backed video metadata extraction
//!
//! Spawns `ffprobe` against a scratch copy of the uploaded bytes and parses
//! its JSON output. Everything here is best-effort: a missing binary, a
//! broken container, or unparseable output all collapse to `None`.

use async_trait::async_trait;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use album_core::entities::VideoMetadata;
use album_core::traits::MediaProbe;

/// Probe implementation shelling out to ffprobe
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    binary: String,
}

impl FfprobeProbe {
    /// Create a probe using the `ffprobe` found on PATH
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: "ffprobe".to_string(),
        }
    }

    /// Create a probe with an explicit binary path
    #[must_use]
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn scratch_path(extension: &str) -> PathBuf {
        let nonce: u64 = rand::thread_rng().gen();
        std::env::temp_dir().join(format!(
            "album-probe-{}-{nonce:016x}.{extension}",
            std::process::id()
        ))
    }

    async fn run(&self, path: &Path) -> Option<String> {
        let output = Command::new(&self.binary)
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            debug!(status = ?output.status, "ffprobe exited nonzero");
            return None;
        }

        String::from_utf8(output.stdout).ok()
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    async fn probe(&self, bytes: &[u8], extension: &str) -> Option<VideoMetadata> {
        let path = Self::scratch_path(extension);

        if tokio::fs::write(&path, bytes).await.is_err() {
            return None;
        }

        let stdout = self.run(&path).await;

        // Scratch file cleanup happens regardless of probe success
        let _ = tokio::fs::remove_file(&path).await;

        parse_probe_output(&stdout?)
    }
}

/// Parse ffprobe JSON into duration and dimensions
///
/// Duration comes from the container format; dimensions from the first
/// stream carrying both width and height.
fn parse_probe_output(raw: &str) -> Option<VideoMetadata> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;

    let duration_secs = value
        .get("format")?
        .get("duration")?
        .as_str()?
        .parse::<f64>()
        .ok()?
        .round() as i32;

    let streams = value.get("streams")?.as_array()?;
    let video_stream = streams
        .iter()
        .find(|s| s.get("width").is_some() && s.get("height").is_some())?;

    let width = video_stream.get("width")?.as_i64()? as i32;
    let height = video_stream.get("height")?.as_i64()? as i32;

    Some(VideoMetadata {
        duration_secs,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            { "index": 0, "codec_type": "audio", "sample_rate": "48000" },
            { "index": 1, "codec_type": "video", "width": 1920, "height": 1080 }
        ],
        "format": { "filename": "clip.mp4", "duration": "12.480000" }
    }"#;

    #[test]
    fn test_parse_sample_output() {
        let meta = parse_probe_output(SAMPLE).unwrap();
        assert_eq!(meta.duration_secs, 12);
        assert_eq!(meta.width, 1920);
        assert_eq!(meta.height, 1080);
    }

    #[test]
    fn test_parse_rounds_duration() {
        let raw = SAMPLE.replace("12.480000", "12.7");
        assert_eq!(parse_probe_output(&raw).unwrap().duration_secs, 13);
    }

    #[test]
    fn test_parse_requires_video_stream() {
        let raw = r#"{
            "streams": [{ "index": 0, "codec_type": "audio" }],
            "format": { "duration": "3.0" }
        }"#;
        assert!(parse_probe_output(raw).is_none());
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_probe_output("not json").is_none());
        assert!(parse_probe_output("{}").is_none());
    }

    #[tokio::test]
    async fn test_probe_with_missing_binary_is_none() {
        let probe = FfprobeProbe::with_binary("/nonexistent/ffprobe-binary");
        assert_eq!(probe.probe(b"bytes", "mp4").await, None);
    }
}
