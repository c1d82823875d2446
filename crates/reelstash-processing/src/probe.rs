//! Geometry probing
//!
//! Runs an external inspection tool (ffprobe) against a staged upload and
//! classifies the first video stream's dimensions. Parsing is split out as a
//! pure function so it can be tested without the tool installed.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use reelstash_core::models::AspectClass;
use reelstash_core::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to spawn probe tool: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("probe tool exited with {status}: {stderr}")]
    ToolFailed { status: i32, stderr: String },

    #[error("failed to parse probe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no streams found")]
    NoStreams,

    #[error("no width or height found in stream")]
    MissingDimensions,
}

impl From<ProbeError> for AppError {
    fn from(err: ProbeError) -> Self {
        AppError::Probe(err.to_string())
    }
}

/// Pixel dimensions of the first stream of a probed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

impl VideoDimensions {
    pub fn classify(&self) -> AspectClass {
        AspectClass::from_dimensions(self.width, self.height)
    }
}

/// Capability interface for geometry probing.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    /// Probe a local video file for the dimensions of its first stream.
    async fn probe_dimensions(&self, path: &Path) -> Result<VideoDimensions, ProbeError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

/// Parse the stream-list JSON emitted by the probe tool.
fn parse_probe_output(stdout: &[u8]) -> Result<VideoDimensions, ProbeError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;
    let stream = output.streams.first().ok_or(ProbeError::NoStreams)?;
    if stream.width == 0 || stream.height == 0 {
        return Err(ProbeError::MissingDimensions);
    }
    Ok(VideoDimensions {
        width: stream.width,
        height: stream.height,
    })
}

/// ffprobe-backed inspector.
pub struct FfprobeInspector {
    ffprobe_path: String,
}

impl FfprobeInspector {
    pub fn new(ffprobe_path: String) -> Self {
        Self { ffprobe_path }
    }
}

#[async_trait]
impl MediaInspector for FfprobeInspector {
    async fn probe_dimensions(&self, path: &Path) -> Result<VideoDimensions, ProbeError> {
        let output = Command::new(&self.ffprobe_path)
            .arg("-v")
            .arg("error")
            .arg("-print_format")
            .arg("json")
            .arg("-show_streams")
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProbeError::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let dimensions = parse_probe_output(&output.stdout)?;
        tracing::debug!(
            path = %path.display(),
            width = dimensions.width,
            height = dimensions.height,
            "Probed video dimensions"
        );
        Ok(dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output_first_stream() {
        let json = br#"{"streams":[{"width":1920,"height":1080,"codec_type":"video"},{"codec_type":"audio"}]}"#;
        let dims = parse_probe_output(json).unwrap();
        assert_eq!(dims.width, 1920);
        assert_eq!(dims.height, 1080);
        assert_eq!(dims.classify(), AspectClass::Landscape);
    }

    #[test]
    fn test_parse_probe_output_portrait() {
        let json = br#"{"streams":[{"width":1080,"height":1920}]}"#;
        let dims = parse_probe_output(json).unwrap();
        assert_eq!(dims.classify(), AspectClass::Portrait);
    }

    #[test]
    fn test_parse_probe_output_no_streams() {
        let json = br#"{"streams":[]}"#;
        assert!(matches!(parse_probe_output(json), Err(ProbeError::NoStreams)));
    }

    #[test]
    fn test_parse_probe_output_missing_streams_field() {
        let json = br#"{}"#;
        assert!(matches!(parse_probe_output(json), Err(ProbeError::NoStreams)));
    }

    #[test]
    fn test_parse_probe_output_zero_dimensions() {
        let json = br#"{"streams":[{"width":0,"height":1080}]}"#;
        assert!(matches!(
            parse_probe_output(json),
            Err(ProbeError::MissingDimensions)
        ));
    }

    #[test]
    fn test_parse_probe_output_rejects_garbage() {
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(ProbeError::Parse(_))
        ));
    }
}
