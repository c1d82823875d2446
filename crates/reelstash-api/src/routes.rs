//! Route configuration

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

/// Slack on top of the configured media limit so multipart framing does not
/// trip the transport-level body cap before the per-field check runs.
const MULTIPART_OVERHEAD_BYTES: usize = 1 << 20;

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let video_body_limit =
        DefaultBodyLimit::max(state.config.max_video_size_bytes + MULTIPART_OVERHEAD_BYTES);
    let thumbnail_body_limit =
        DefaultBodyLimit::max(state.config.max_thumbnail_size_bytes + MULTIPART_OVERHEAD_BYTES);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets_root = state.config.assets_root.clone();

    let api = Router::new()
        .route("/videos", post(handlers::video_create::create_video))
        .route("/videos/{video_id}", get(handlers::video_get::get_video))
        .route(
            "/videos/{video_id}/upload",
            post(handlers::video_upload::upload_video).layer(video_body_limit),
        )
        .route(
            "/videos/{video_id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail).layer(thumbnail_body_limit),
        )
        .with_state(state);

    Router::new()
        .merge(api)
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .nest_service("/assets", ServeDir::new(assets_root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
