//! Configuration module
//!
//! Environment-driven configuration for the upload service. The whole config
//! is resolved once at startup and injected into the application state; the
//! pipeline never reads ambient process state.

use std::env;

use crate::error::AppError;

const DEFAULT_SERVER_PORT: u16 = 8091;
const DEFAULT_MAX_VIDEO_SIZE_BYTES: usize = 1 << 30; // 1 GiB
const DEFAULT_MAX_THUMBNAIL_SIZE_BYTES: usize = 10 << 20; // 10 MiB
const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 15 * 60;

/// How persisted video locators are built and resolved into playable URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Store `"{bucket},{key}"` and presign a time-limited URL on read.
    Presigned,
    /// Store a CDN-relative URL directly; read is passthrough.
    Cdn,
}

/// Service configuration, resolved from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// HS256 secret for bearer-token validation.
    pub jwt_secret: String,

    // Object storage
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (e.g. MinIO). `http://`
    /// endpoints are allowed for local development.
    pub s3_endpoint: Option<String>,
    /// When set, locators are direct CDN URLs instead of presigned pairs.
    pub cdn_base_url: Option<String>,
    pub presign_expiry_secs: u64,

    // Upload limits
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,

    // External tools
    pub ffmpeg_path: String,
    pub ffprobe_path: String,

    // Local thumbnail assets
    pub assets_root: String,
    /// Public base URL of this server, used to build thumbnail URLs.
    pub public_base_url: String,
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when a required variable (`JWT_SECRET`, `S3_BUCKET`) is missing,
    /// so misconfiguration surfaces at startup rather than mid-request.
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = env_opt("JWT_SECRET")
            .ok_or_else(|| AppError::Internal("JWT_SECRET must be set".to_string()))?;
        let s3_bucket = env_opt("S3_BUCKET")
            .ok_or_else(|| AppError::Internal("S3_BUCKET must be set".to_string()))?;

        let server_port = env_parse("SERVER_PORT", DEFAULT_SERVER_PORT);

        let config = Config {
            server_port,
            jwt_secret,
            s3_bucket,
            s3_region: env_string("S3_REGION", "us-east-1"),
            s3_endpoint: env_opt("S3_ENDPOINT"),
            cdn_base_url: env_opt("CDN_BASE_URL"),
            presign_expiry_secs: env_parse("PRESIGN_EXPIRY_SECS", DEFAULT_PRESIGN_EXPIRY_SECS),
            max_video_size_bytes: env_parse("MAX_VIDEO_SIZE_BYTES", DEFAULT_MAX_VIDEO_SIZE_BYTES),
            max_thumbnail_size_bytes: env_parse(
                "MAX_THUMBNAIL_SIZE_BYTES",
                DEFAULT_MAX_THUMBNAIL_SIZE_BYTES,
            ),
            ffmpeg_path: env_string("FFMPEG_PATH", "ffmpeg"),
            ffprobe_path: env_string("FFPROBE_PATH", "ffprobe"),
            assets_root: env_string("ASSETS_ROOT", "./assets"),
            public_base_url: env_string(
                "PUBLIC_BASE_URL",
                &format!("http://localhost:{}", server_port),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.max_video_size_bytes == 0 {
            return Err(AppError::Internal(
                "MAX_VIDEO_SIZE_BYTES must be greater than zero".to_string(),
            ));
        }
        if let Some(ref base) = self.cdn_base_url {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(AppError::Internal(
                    "CDN_BASE_URL must be an absolute http(s) URL".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Delivery mode derived from the presence of a CDN base URL.
    pub fn delivery_mode(&self) -> DeliveryMode {
        if self.cdn_base_url.is_some() {
            DeliveryMode::Cdn
        } else {
            DeliveryMode::Presigned
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: DEFAULT_SERVER_PORT,
            jwt_secret: "secret".to_string(),
            s3_bucket: "reelstash-videos".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            cdn_base_url: None,
            presign_expiry_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
            max_video_size_bytes: DEFAULT_MAX_VIDEO_SIZE_BYTES,
            max_thumbnail_size_bytes: DEFAULT_MAX_THUMBNAIL_SIZE_BYTES,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            assets_root: "./assets".to_string(),
            public_base_url: "http://localhost:8091".to_string(),
        }
    }

    #[test]
    fn test_delivery_mode_defaults_to_presigned() {
        let config = base_config();
        assert_eq!(config.delivery_mode(), DeliveryMode::Presigned);
    }

    #[test]
    fn test_delivery_mode_cdn_when_base_url_set() {
        let mut config = base_config();
        config.cdn_base_url = Some("https://cdn.example.com".to_string());
        assert_eq!(config.delivery_mode(), DeliveryMode::Cdn);
    }

    #[test]
    fn test_validate_rejects_zero_video_limit() {
        let mut config = base_config();
        config.max_video_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_cdn_base() {
        let mut config = base_config();
        config.cdn_base_url = Some("cdn.example.com".to_string());
        assert!(config.validate().is_err());
    }
}
