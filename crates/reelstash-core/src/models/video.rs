use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record owned by the metadata store.
///
/// `video_url` holds the persisted locator: either a direct CDN URL or the
/// composite `"{bucket},{key}"` pair, depending on delivery mode. Once set it
/// always carries enough information to reconstruct a retrieval URL. An upload
/// replaces any prior locator; deletion is the metadata store's concern.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoAsset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoAsset {
    pub fn new(user_id: Uuid, title: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_asset_has_no_locators() {
        let asset = VideoAsset::new(Uuid::new_v4(), "demo".to_string(), None);
        assert!(asset.video_url.is_none());
        assert!(asset.thumbnail_url.is_none());
    }

    #[test]
    fn test_ownership_check() {
        let owner = Uuid::new_v4();
        let asset = VideoAsset::new(owner, "demo".to_string(), None);
        assert!(asset.is_owned_by(owner));
        assert!(!asset.is_owned_by(Uuid::new_v4()));
    }
}
