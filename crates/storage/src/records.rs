use crate::StorageError;
use gallery_models::{Category, GalleryItem, GalleryItemPatch, NewGalleryItem};

/// Metadata half of a storage backend.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, category: Option<Category>) -> Result<Vec<GalleryItem>, StorageError>;

    async fn get(&self, id: &str) -> Result<Option<GalleryItem>, StorageError>;

    async fn insert(&self, item: NewGalleryItem) -> Result<GalleryItem, StorageError>;

    async fn insert_many(&self, items: Vec<NewGalleryItem>) -> Result<Vec<GalleryItem>, StorageError>;

    async fn update(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem, StorageError>;

    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    fn name(&self) -> &'static str;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Filters by category and orders newest first
pub(crate) fn select(items: impl IntoIterator<Item = GalleryItem>, category: Option<Category>) -> Vec<GalleryItem> {
    let mut selected: Vec<GalleryItem> = items
        .into_iter()
        .filter(|item| category.map_or(true, |c| item.category == c))
        .collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    selected
}

pub(crate) fn check_new_item(item: &NewGalleryItem) -> Result<(), StorageError> {
    if item.title.trim().is_empty() {
        return Err(StorageError::InvalidRecord("title must not be empty".to_string()));
    }
    if item.image_url.trim().is_empty() {
        return Err(StorageError::InvalidRecord("image_url must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn check_patch(patch: &GalleryItemPatch) -> Result<(), StorageError> {
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(StorageError::InvalidRecord("title must not be empty".to_string()));
    }
    if patch.image_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        return Err(StorageError::InvalidRecord("image_url must not be empty".to_string()));
    }
    Ok(())
}
