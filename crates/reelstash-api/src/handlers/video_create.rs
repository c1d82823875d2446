use std::sync::Arc;

use axum::{extract::State, Json};

use reelstash_core::models::{CreateVideoRequest, VideoAsset};

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/videos",
    tag = "videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 200, description = "Video record created", body = VideoAsset),
        (status = 401, description = "Missing/invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateVideoRequest>,
) -> Result<Json<VideoAsset>, HttpAppError> {
    let asset = VideoAsset::new(user_id, request.title, request.description);
    state.assets.create(asset.clone()).await?;

    tracing::info!(video_id = %asset.id, "Video record created");
    Ok(Json(asset))
}
