//! Storage locators
//!
//! A locator is the (bucket, key) pair identifying an object in storage.
//! In presigned delivery mode it is persisted as the composite string
//! `"{bucket},{key}"` and decoded back on read.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLocator {
    pub bucket: String,
    pub key: String,
}

impl StorageLocator {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Encode as the persisted composite form `"{bucket},{key}"`.
    pub fn encode(&self) -> String {
        format!("{},{}", self.bucket, self.key)
    }

    /// Decode a persisted composite locator.
    ///
    /// Fails unless the input splits into exactly two non-empty
    /// comma-separated parts.
    pub fn decode(value: &str) -> Result<StorageLocator, AppError> {
        let parts: Vec<&str> = value.split(',').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(AppError::LocatorFormat(format!(
                "expected 'bucket,key', got {:?}",
                value
            )));
        }
        Ok(StorageLocator::new(parts[0], parts[1]))
    }
}
