use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use reelstash_core::models::VideoAsset;
use reelstash_core::AppError;

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::resolved_asset;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found, locator resolved", body = VideoAsset),
        (status = 401, description = "Missing/invalid token or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Locator or presign failure", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
#[tracing::instrument(skip(state), fields(video_id = %video_id, user_id = %user_id))]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(video_id): Path<Uuid>,
) -> Result<Json<VideoAsset>, HttpAppError> {
    let asset = state
        .assets
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !asset.is_owned_by(user_id) {
        return Err(AppError::Unauthorized("Not the owner of this video".to_string()).into());
    }

    let response = resolved_asset(&state, asset).await?;
    Ok(Json(response))
}
