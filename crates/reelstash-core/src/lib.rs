//! Reelstash core library
//!
//! Shared foundation for the upload service: the unified `AppError` taxonomy,
//! environment-driven configuration, and the domain models (video assets,
//! storage locators, aspect classification).

pub mod config;
pub mod error;
pub mod models;

pub use config::{Config, DeliveryMode};
pub use error::{AppError, ErrorMetadata, LogLevel};
