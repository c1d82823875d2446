//! Locator resolution
//!
//! The upload pipeline is the same in every deployment; only the final URL
//! construction differs. `LocatorResolver` captures that seam with two
//! implementations selected by configuration: presigned (store `bucket,key`,
//! sign on read) and CDN (store a direct URL, read is passthrough).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use reelstash_core::models::StorageLocator;
use reelstash_core::{AppError, Config, DeliveryMode};

use crate::traits::ObjectStorage;

#[async_trait]
pub trait LocatorResolver: Send + Sync {
    /// Build the locator string persisted for a freshly uploaded key.
    fn locator_for(&self, key: &str) -> String;

    /// Resolve a persisted locator into a URL the client can fetch.
    async fn resolve(&self, stored: &str) -> Result<String, AppError>;
}

/// Stores composite `"{bucket},{key}"` locators and presigns them on read.
pub struct PresignedResolver {
    storage: Arc<dyn ObjectStorage>,
    expiry: Duration,
}

impl PresignedResolver {
    pub fn new(storage: Arc<dyn ObjectStorage>, expiry: Duration) -> Self {
        Self { storage, expiry }
    }
}

#[async_trait]
impl LocatorResolver for PresignedResolver {
    fn locator_for(&self, key: &str) -> String {
        StorageLocator::new(self.storage.bucket(), key).encode()
    }

    async fn resolve(&self, stored: &str) -> Result<String, AppError> {
        let locator = StorageLocator::decode(stored)?;
        let url = self
            .storage
            .presigned_get_url(&locator.key, self.expiry)
            .await?;
        Ok(url)
    }
}

/// Stores direct CDN URLs; resolution is passthrough.
pub struct CdnResolver {
    base_url: String,
}

impl CdnResolver {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LocatorResolver for CdnResolver {
    fn locator_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    async fn resolve(&self, stored: &str) -> Result<String, AppError> {
        Ok(stored.to_string())
    }
}

/// Pick the resolver matching the configured delivery mode.
pub fn create_resolver(config: &Config, storage: Arc<dyn ObjectStorage>) -> Arc<dyn LocatorResolver> {
    match config.delivery_mode() {
        DeliveryMode::Cdn => {
            // validate() guarantees the base URL is present in CDN mode
            let base = config.cdn_base_url.clone().unwrap_or_default();
            Arc::new(CdnResolver::new(base))
        }
        DeliveryMode::Presigned => Arc::new(PresignedResolver::new(
            storage,
            Duration::from_secs(config.presign_expiry_secs),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{StorageResult, StorageError};

    struct FakeStorage;

    #[async_trait]
    impl ObjectStorage for FakeStorage {
        async fn put_file(
            &self,
            _key: &str,
            _source: &std::path::Path,
            _content_type: &str,
        ) -> StorageResult<()> {
            Ok(())
        }

        async fn presigned_get_url(
            &self,
            key: &str,
            expires_in: Duration,
        ) -> StorageResult<String> {
            Ok(format!(
                "https://signed.example/{}?X-Amz-Expires={}",
                key,
                expires_in.as_secs()
            ))
        }

        fn bucket(&self) -> &str {
            "reelstash-videos"
        }
    }

    struct UnreachableStorage;

    #[async_trait]
    impl ObjectStorage for UnreachableStorage {
        async fn put_file(
            &self,
            _key: &str,
            _source: &std::path::Path,
            _content_type: &str,
        ) -> StorageResult<()> {
            Err(StorageError::BackendError("unreachable".to_string()))
        }

        async fn presigned_get_url(
            &self,
            _key: &str,
            _expires_in: Duration,
        ) -> StorageResult<String> {
            Err(StorageError::PresignFailed("unreachable".to_string()))
        }

        fn bucket(&self) -> &str {
            "reelstash-videos"
        }
    }

    #[tokio::test]
    async fn test_presigned_resolver_round_trip() {
        let resolver =
            PresignedResolver::new(Arc::new(FakeStorage), Duration::from_secs(900));

        let stored = resolver.locator_for("landscape/abc.mp4");
        assert_eq!(stored, "reelstash-videos,landscape/abc.mp4");

        let url = resolver.resolve(&stored).await.unwrap();
        assert_eq!(
            url,
            "https://signed.example/landscape/abc.mp4?X-Amz-Expires=900"
        );
    }

    #[tokio::test]
    async fn test_presigned_resolver_rejects_malformed_locator() {
        let resolver =
            PresignedResolver::new(Arc::new(FakeStorage), Duration::from_secs(900));
        assert!(matches!(
            resolver.resolve("noComma").await,
            Err(AppError::LocatorFormat(_))
        ));
        assert!(matches!(
            resolver.resolve("a,b,c").await,
            Err(AppError::LocatorFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_presigned_resolver_propagates_presign_failure() {
        let resolver =
            PresignedResolver::new(Arc::new(UnreachableStorage), Duration::from_secs(900));
        assert!(matches!(
            resolver.resolve("bucket,key").await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_cdn_resolver_builds_direct_urls() {
        let resolver = CdnResolver::new("https://cdn.example.com/".to_string());
        let stored = resolver.locator_for("portrait/xyz.mp4");
        assert_eq!(stored, "https://cdn.example.com/portrait/xyz.mp4");
        assert_eq!(resolver.resolve(&stored).await.unwrap(), stored);
    }
}
