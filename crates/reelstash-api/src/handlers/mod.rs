//! Request handlers

pub mod thumbnail_upload;
pub mod video_create;
pub mod video_get;
pub mod video_upload;

use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use tokio::io::AsyncWriteExt;

use reelstash_core::models::VideoAsset;
use reelstash_core::AppError;

use crate::state::AppState;

/// Strip MIME parameters (e.g. "video/mp4; codecs=avc1" -> "video/mp4").
pub(crate) fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// A body-limit breach at the transport layer surfaces as a multipart read
/// error; keep its 413 status instead of collapsing it into 400.
pub(crate) fn bad_multipart(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge("Upload exceeds the configured size limit".to_string());
    }
    AppError::BadRequest(format!("Failed to read multipart: {}", err))
}

/// Stream a multipart field into a local file, enforcing `max_bytes` as the
/// data arrives so an oversized body is rejected before it is fully buffered.
pub(crate) async fn copy_field_to_file(
    field: &mut Field<'_>,
    path: &Path,
    max_bytes: usize,
) -> Result<u64, AppError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(bad_multipart)? {
        written += chunk.len() as u64;
        if written > max_bytes as u64 {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload exceeds the {} MB limit",
                max_bytes / 1024 / 1024
            )));
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(written)
}

/// Clone of the asset with its persisted video locator resolved into a URL
/// the client can actually fetch (a presigned URL in presigned mode).
pub(crate) async fn resolved_asset(
    state: &AppState,
    mut asset: VideoAsset,
) -> Result<VideoAsset, AppError> {
    if let Some(ref stored) = asset.video_url {
        let url = state.resolver.resolve(stored).await?;
        asset.video_url = Some(url);
    }
    Ok(asset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mime_type_strips_parameters() {
        assert_eq!(normalize_mime_type("video/mp4; codecs=avc1"), "video/mp4");
        assert_eq!(normalize_mime_type("video/mp4"), "video/mp4");
        assert_eq!(normalize_mime_type(" image/png "), "image/png");
    }
}
