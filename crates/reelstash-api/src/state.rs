//! Application state
//!
//! All collaborators enter the pipeline through this state: the asset
//! repository, the object store, the subprocess capabilities, and the
//! locator resolver. Everything behind a trait so tests can substitute fakes.

use std::sync::Arc;

use reelstash_core::{AppError, Config};
use reelstash_processing::{FfmpegRemuxer, FfprobeInspector, MediaInspector, MediaRemuxer};
use reelstash_storage::{create_resolver, LocatorResolver, ObjectStorage, S3Storage};

use crate::repository::{AssetRepository, InMemoryAssetRepository};

pub struct AppState {
    pub config: Config,
    pub assets: Arc<dyn AssetRepository>,
    pub storage: Arc<dyn ObjectStorage>,
    pub inspector: Arc<dyn MediaInspector>,
    pub remuxer: Arc<dyn MediaRemuxer>,
    pub resolver: Arc<dyn LocatorResolver>,
}

impl AppState {
    /// Wire up the production collaborators from configuration.
    pub fn from_config(config: Config) -> Result<Arc<Self>, AppError> {
        let storage: Arc<dyn ObjectStorage> = Arc::new(
            S3Storage::new(
                config.s3_bucket.clone(),
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
            )
            .map_err(AppError::from)?,
        );
        let resolver = create_resolver(&config, storage.clone());

        Ok(Arc::new(AppState {
            assets: Arc::new(InMemoryAssetRepository::new()),
            inspector: Arc::new(FfprobeInspector::new(config.ffprobe_path.clone())),
            remuxer: Arc::new(FfmpegRemuxer::new(config.ffmpeg_path.clone())),
            storage,
            resolver,
            config,
        }))
    }
}
