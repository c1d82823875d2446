//! Domain models

pub mod geometry;
pub mod storage;
pub mod video;

pub use geometry::AspectClass;
pub use storage::StorageLocator;
pub use video::{CreateVideoRequest, VideoAsset};
