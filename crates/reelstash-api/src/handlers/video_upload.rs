//! Video upload orchestrator
//!
//! Drives the full pipeline for one upload request: resolve and authorize the
//! target asset, stage the multipart stream locally, probe geometry, remux for
//! fast-start playback, upload to the object store under a fresh
//! classification-prefixed key, and persist the new locator. Stages run
//! strictly in sequence; staged artifacts are scoped to this request and
//! removed on every exit path.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use reelstash_core::models::VideoAsset;
use reelstash_core::AppError;
use reelstash_processing::UploadStaging;
use reelstash_storage::generate_video_key;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::{bad_multipart, copy_field_to_file, normalize_mime_type, resolved_asset};
use crate::state::AppState;

const VIDEO_FIELD: &str = "video";
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

#[utoipa::path(
    post,
    path = "/videos/{video_id}/upload",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Target video asset")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded and processed", body = VideoAsset),
        (status = 400, description = "Bad ID, missing field, or wrong file type", body = ErrorResponse),
        (status = 401, description = "Missing/invalid token or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Processing, storage, or persistence failure", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(video_id = %video_id, user_id = %user_id))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(video_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<VideoAsset>, HttpAppError> {
    // Resolve and authorize before touching the body: a non-owner request
    // must have zero side effects.
    let mut asset = state
        .assets
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !asset.is_owned_by(user_id) {
        return Err(AppError::Unauthorized("Not the owner of this video".to_string()).into());
    }

    // Stage the raw bytes. Content type is checked before any staging is
    // created, so a rejected upload leaves nothing on disk.
    let mut staged: Option<(UploadStaging, u64)> = None;
    while let Some(mut field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(normalize_mime_type)
            .unwrap_or_default()
            .to_string();
        if content_type != VIDEO_CONTENT_TYPE {
            return Err(AppError::BadRequest(format!(
                "Bad file type: expected {}, got {:?}",
                VIDEO_CONTENT_TYPE, content_type
            ))
            .into());
        }

        let staging = UploadStaging::new()
            .map_err(|e| AppError::Internal(format!("Failed to create staging area: {}", e)))?;
        let written = copy_field_to_file(
            &mut field,
            &staging.raw_path(),
            state.config.max_video_size_bytes,
        )
        .await?;
        staged = Some((staging, written));
        break;
    }

    let (staging, size_bytes) = staged.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{}'", VIDEO_FIELD))
    })?;
    let raw_path = staging.raw_path();

    // Probe failure aborts the pipeline; a successful probe of an unusual
    // ratio still classifies as "other".
    let dimensions = state
        .inspector
        .probe_dimensions(&raw_path)
        .await
        .map_err(AppError::from)?;
    let classification = dimensions.classify();

    let processed_path = state
        .remuxer
        .remux_faststart(&raw_path)
        .await
        .map_err(AppError::from)?;

    // The processed artifact is streamed from disk into the store, so the
    // upload never has to fit in memory.
    let key = generate_video_key(classification);
    state
        .storage
        .put_file(&key, &processed_path, VIDEO_CONTENT_TYPE)
        .await
        .map_err(AppError::from)?;

    // The object stays uploaded if this update fails; there is no
    // compensating delete (accepted orphan risk).
    asset.video_url = Some(state.resolver.locator_for(&key));
    asset.updated_at = Utc::now();
    state.assets.update(&asset).await?;

    tracing::info!(
        key = %key,
        classification = %classification,
        width = dimensions.width,
        height = dimensions.height,
        size_bytes,
        "Video upload processed"
    );

    let response = resolved_asset(&state, asset).await?;
    drop(staging);
    Ok(Json(response))
}
