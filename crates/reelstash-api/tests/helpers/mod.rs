//! Shared test harness: the router wired with fake capability
//! implementations so the full upload pipeline runs without ffmpeg, ffprobe,
//! or an object store.

// Each integration test binary uses a different subset of the harness.
#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Duration;
use tempfile::TempDir;
use uuid::Uuid;

use reelstash_api::auth::mint_token;
use reelstash_api::repository::{AssetRepository, InMemoryAssetRepository};
use reelstash_api::routes::build_router;
use reelstash_api::state::AppState;
use reelstash_core::models::VideoAsset;
use reelstash_core::Config;
use reelstash_processing::remux::faststart_output_path;
use reelstash_processing::{
    MediaInspector, MediaRemuxer, ProbeError, RemuxError, VideoDimensions,
};
use reelstash_storage::{create_resolver, ObjectStorage, StorageError, StorageResult};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const TEST_BUCKET: &str = "test-videos";

pub struct FakeInspector {
    /// `None` makes every probe fail.
    pub dimensions: Option<(u32, u32)>,
}

#[async_trait]
impl MediaInspector for FakeInspector {
    async fn probe_dimensions(&self, _path: &Path) -> Result<VideoDimensions, ProbeError> {
        match self.dimensions {
            Some((width, height)) => Ok(VideoDimensions { width, height }),
            None => Err(ProbeError::NoStreams),
        }
    }
}

pub struct FakeRemuxer {
    pub fail: bool,
}

#[async_trait]
impl MediaRemuxer for FakeRemuxer {
    async fn remux_faststart(&self, input: &Path) -> Result<std::path::PathBuf, RemuxError> {
        if self.fail {
            return Err(RemuxError::ToolFailed {
                status: 1,
                stderr: "moov atom not found".to_string(),
            });
        }
        let output = faststart_output_path(input);
        tokio::fs::copy(input, &output).await?;
        Ok(output)
    }
}

#[derive(Debug, Clone)]
pub struct PutRecord {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Default)]
pub struct RecordingStorage {
    pub puts: Mutex<Vec<PutRecord>>,
    pub fail_puts: bool,
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn put_file(
        &self,
        key: &str,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.fail_puts {
            return Err(StorageError::UploadFailed("connection refused".to_string()));
        }
        let data = tokio::fs::read(source).await?;
        self.puts.lock().unwrap().push(PutRecord {
            key: key.to_string(),
            size: data.len(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: StdDuration,
    ) -> StorageResult<String> {
        Ok(format!(
            "https://signed.example/{}?X-Amz-Expires={}",
            key,
            expires_in.as_secs()
        ))
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }
}

pub struct HarnessOptions {
    pub dimensions: Option<(u32, u32)>,
    pub remux_fails: bool,
    pub put_fails: bool,
    pub cdn_base_url: Option<String>,
    pub max_video_size_bytes: usize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            dimensions: Some((1920, 1080)),
            remux_fails: false,
            put_fails: false,
            cdn_base_url: None,
            max_video_size_bytes: 1 << 30,
        }
    }
}

pub struct TestHarness {
    pub server: TestServer,
    pub assets: Arc<InMemoryAssetRepository>,
    pub storage: Arc<RecordingStorage>,
    pub assets_root: std::path::PathBuf,
    // Held so the assets root outlives the harness.
    _assets_dir: TempDir,
}

impl TestHarness {
    pub async fn with_options(options: HarnessOptions) -> Self {
        let assets_dir = TempDir::new().unwrap();

        let config = Config {
            server_port: 0,
            jwt_secret: JWT_SECRET.to_string(),
            s3_bucket: TEST_BUCKET.to_string(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            cdn_base_url: options.cdn_base_url,
            presign_expiry_secs: 900,
            max_video_size_bytes: options.max_video_size_bytes,
            max_thumbnail_size_bytes: 10 << 20,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            assets_root: assets_dir.path().to_string_lossy().to_string(),
            public_base_url: "http://localhost:8091".to_string(),
        };

        let assets = Arc::new(InMemoryAssetRepository::new());
        let storage = Arc::new(RecordingStorage {
            puts: Mutex::new(Vec::new()),
            fail_puts: options.put_fails,
        });
        let resolver = create_resolver(&config, storage.clone());

        let state = Arc::new(AppState {
            config,
            assets: assets.clone(),
            storage: storage.clone(),
            inspector: Arc::new(FakeInspector {
                dimensions: options.dimensions,
            }),
            remuxer: Arc::new(FakeRemuxer {
                fail: options.remux_fails,
            }),
            resolver,
        });

        let server = TestServer::new(build_router(state)).unwrap();

        Self {
            server,
            assets,
            storage,
            assets_root: assets_dir.path().to_path_buf(),
            _assets_dir: assets_dir,
        }
    }

    pub async fn new() -> Self {
        Self::with_options(HarnessOptions::default()).await
    }

    /// Insert a video record owned by `user_id` straight into the repository.
    pub async fn seed_video(&self, user_id: Uuid) -> VideoAsset {
        let asset = VideoAsset::new(user_id, "test clip".to_string(), None);
        self.assets.create(asset.clone()).await.unwrap();
        asset
    }

    pub fn recorded_puts(&self) -> Vec<PutRecord> {
        self.storage.puts.lock().unwrap().clone()
    }
}

pub fn token_for(user_id: Uuid) -> String {
    mint_token(user_id, JWT_SECRET, Duration::hours(1)).unwrap()
}
