//! Reelstash storage library
//!
//! Object-storage abstraction for the upload service: the `ObjectStorage`
//! trait, an S3 backend, classification-prefixed key generation, and the
//! `LocatorResolver` that turns persisted locators into playable URLs.
//!
//! # Key format
//!
//! Video keys are `{classification}/{token}.mp4` where classification is one
//! of `landscape`, `portrait`, `other` and the token is the URL-safe base64
//! encoding of 32 cryptographically random bytes. Keys are never reused.

pub mod keys;
pub mod resolver;
pub mod s3;
pub mod traits;

pub use keys::{generate_thumbnail_token, generate_video_key};
pub use resolver::{create_resolver, CdnResolver, LocatorResolver, PresignedResolver};
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult};
