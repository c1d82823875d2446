//! Request-scoped staging of upload artifacts
//!
//! Each upload request gets its own temporary directory holding the raw
//! uploaded bytes and the remuxed output. The directory is removed when the
//! staging value is dropped, so cleanup holds on every exit path - success,
//! validation failure, processing failure, or panic.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

const RAW_ARTIFACT_NAME: &str = "upload.mp4";

/// Scoped staging area for one upload request.
///
/// Owns a temp directory for the request's transient artifacts. Keep the
/// value alive for the whole pipeline; drop it (or let it go out of scope)
/// to remove everything.
pub struct UploadStaging {
    dir: TempDir,
}

impl UploadStaging {
    pub fn new() -> std::io::Result<Self> {
        let dir = TempDir::with_prefix("reelstash-upload-")?;
        Ok(Self { dir })
    }

    /// Path where the raw uploaded bytes are written.
    pub fn raw_path(&self) -> PathBuf {
        self.dir.path().join(RAW_ARTIFACT_NAME)
    }

    pub fn dir_path(&self) -> &Path {
        self.dir.path()
    }
}
