use crate::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted gallery entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owner reference, only informative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Record fields supplied on insert; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGalleryItem {
    pub title: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Partial update. `id`, `created_at` and `updated_at` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewGalleryItem {
    pub fn into_item(self, id: String, now: DateTime<Utc>) -> GalleryItem {
        GalleryItem {
            id,
            title: self.title,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
            user_id: self.user_id,
        }
    }
}

impl GalleryItemPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }
}

impl GalleryItem {
    /// Applies a patch and refreshes `updated_at`, never moving it before `created_at`.
    pub fn apply(&mut self, patch: GalleryItemPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        self.updated_at = now.max(self.created_at);
    }
}
