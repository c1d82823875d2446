//! Thumbnail upload
//!
//! Strict subset of the video pipeline: no probing, no remuxing, no object
//! store. The image is written under the local assets root with a random
//! filename and served statically.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use reelstash_core::models::VideoAsset;
use reelstash_core::AppError;
use reelstash_storage::generate_thumbnail_token;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::{bad_multipart, normalize_mime_type, resolved_asset};
use crate::state::AppState;

const THUMBNAIL_FIELD: &str = "thumbnail";

/// File extension for an accepted thumbnail MIME type.
fn thumbnail_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpeg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

#[utoipa::path(
    post,
    path = "/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Target video asset")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail uploaded", body = VideoAsset),
        (status = 400, description = "Bad ID, missing field, or wrong file type", body = ErrorResponse),
        (status = 401, description = "Missing/invalid token or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(video_id = %video_id, user_id = %user_id))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(video_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<VideoAsset>, HttpAppError> {
    let mut asset = state
        .assets
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !asset.is_owned_by(user_id) {
        return Err(AppError::Unauthorized("Not the owner of this video".to_string()).into());
    }

    let mut uploaded: Option<(Vec<u8>, &'static str)> = None;
    while let Some(mut field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(normalize_mime_type)
            .unwrap_or_default()
            .to_string();
        let extension = thumbnail_extension(&content_type).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Bad file type: expected image/jpeg or image/png, got {:?}",
                content_type
            ))
        })?;

        let max_bytes = state.config.max_thumbnail_size_bytes;
        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(bad_multipart)? {
            if data.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Thumbnail exceeds the {} MB limit",
                    max_bytes / 1024 / 1024
                ))
                .into());
            }
            data.extend_from_slice(&chunk);
        }

        uploaded = Some((data, extension));
        break;
    }

    let (data, extension) = uploaded.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{}'", THUMBNAIL_FIELD))
    })?;

    let filename = format!("{}.{}", generate_thumbnail_token(), extension);
    let path = std::path::Path::new(&state.config.assets_root).join(&filename);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to write thumbnail: {}", e)))?;

    asset.thumbnail_url = Some(format!(
        "{}/assets/{}",
        state.config.public_base_url, filename
    ));
    asset.updated_at = Utc::now();
    state.assets.update(&asset).await?;

    tracing::info!(filename = %filename, "Thumbnail uploaded");

    let response = resolved_asset(&state, asset).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_extension_for_accepted_types() {
        assert_eq!(thumbnail_extension("image/jpeg"), Some("jpeg"));
        assert_eq!(thumbnail_extension("image/png"), Some("png"));
    }

    #[test]
    fn test_thumbnail_extension_rejects_other_types() {
        assert_eq!(thumbnail_extension("image/gif"), None);
        assert_eq!(thumbnail_extension("video/mp4"), None);
    }
}
