//! Fast-start remuxing
//!
//! Rewrites an MP4 container so index metadata precedes media data, letting
//! playback begin before the file is fully downloaded. Stream copy only, no
//! re-encoding.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use reelstash_core::AppError;

/// Suffix appended to the input path to form the deterministic output path.
const FASTSTART_SUFFIX: &str = ".faststart.mp4";

#[derive(Debug, thiserror::Error)]
pub enum RemuxError {
    #[error("failed to spawn remux tool: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("remux tool exited with {status}: {stderr}")]
    ToolFailed { status: i32, stderr: String },
}

impl From<RemuxError> for AppError {
    fn from(err: RemuxError) -> Self {
        AppError::Remux(err.to_string())
    }
}

/// Capability interface for container remuxing.
#[async_trait]
pub trait MediaRemuxer: Send + Sync {
    /// Remux `input` for progressive playback, returning the output path.
    ///
    /// The output path is deterministic: the input path plus a fixed suffix,
    /// so it lands in the same staging directory as the input.
    async fn remux_faststart(&self, input: &Path) -> Result<PathBuf, RemuxError>;
}

/// Output path for a given input: input path + fixed suffix.
pub fn faststart_output_path(input: &Path) -> PathBuf {
    let mut os: OsString = input.as_os_str().to_owned();
    os.push(FASTSTART_SUFFIX);
    PathBuf::from(os)
}

/// ffmpeg-backed remuxer.
pub struct FfmpegRemuxer {
    ffmpeg_path: String,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: String) -> Self {
        Self { ffmpeg_path }
    }
}

#[async_trait]
impl MediaRemuxer for FfmpegRemuxer {
    async fn remux_faststart(&self, input: &Path) -> Result<PathBuf, RemuxError> {
        let output_path = faststart_output_path(input);

        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .arg("-c")
            .arg("copy")
            .arg("-movflags")
            .arg("faststart")
            .arg("-f")
            .arg("mp4")
            .arg(&output_path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RemuxError::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        tracing::debug!(
            input = %input.display(),
            output = %output_path.display(),
            "Remuxed video for fast start"
        );
        Ok(output_path)
    }
}
