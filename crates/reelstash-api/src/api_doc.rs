//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use reelstash_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reelstash API",
        version = "0.1.0",
        description = "Video hosting upload path: multipart video ingestion, fast-start remuxing, aspect-ratio classification, S3 storage with presigned retrieval."
    ),
    paths(
        handlers::video_create::create_video,
        handlers::video_get::get_video,
        handlers::video_upload::upload_video,
        handlers::thumbnail_upload::upload_thumbnail,
    ),
    components(schemas(
        models::VideoAsset,
        models::CreateVideoRequest,
        error::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "videos", description = "Video upload and retrieval")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
