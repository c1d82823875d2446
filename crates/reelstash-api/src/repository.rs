//! Video metadata repository
//!
//! The metadata store is an external collaborator; the pipeline only needs
//! `get` and `update` (plus `create` for the CRUD surface). The trait keeps
//! the orchestrator decoupled from whatever backs the store; the in-memory
//! implementation serves development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use reelstash_core::models::VideoAsset;
use reelstash_core::AppError;

#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn create(&self, asset: VideoAsset) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<VideoAsset>, AppError>;

    /// Replace the stored record for `asset.id`. Fails with a persistence
    /// error when the record does not exist.
    async fn update(&self, asset: &VideoAsset) -> Result<(), AppError>;
}

/// In-memory repository keyed by asset id.
#[derive(Default)]
pub struct InMemoryAssetRepository {
    assets: RwLock<HashMap<Uuid, VideoAsset>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn create(&self, asset: VideoAsset) -> Result<(), AppError> {
        self.assets.write().await.insert(asset.id, asset);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<VideoAsset>, AppError> {
        Ok(self.assets.read().await.get(&id).cloned())
    }

    async fn update(&self, asset: &VideoAsset) -> Result<(), AppError> {
        let mut assets = self.assets.write().await;
        match assets.get_mut(&asset.id) {
            Some(existing) => {
                *existing = asset.clone();
                Ok(())
            }
            None => Err(AppError::Persistence(format!(
                "video {} does not exist",
                asset.id
            ))),
        }
    }
}
