//! Storage abstraction trait

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use reelstash_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object-store client abstraction.
///
/// The backend is bound to a single bucket at construction time; operations
/// address objects by key only. Uploading to an existing key overwrites it,
/// which makes the upload step the only retry-safe stage of the pipeline.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stream the local file at `source` into one object under `key`, with
    /// `content_type` attached as the object's content type.
    async fn put_file(&self, key: &str, source: &Path, content_type: &str) -> StorageResult<()>;

    /// Generate a time-limited presigned URL for reading `key`.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// The bucket this client is bound to.
    fn bucket(&self) -> &str;
}
