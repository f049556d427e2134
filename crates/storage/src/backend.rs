use crate::StorageError;
use bytes::Bytes;
use gallery_models::{Category, GalleryItem, GalleryItemPatch, NewGalleryItem};

/// Everything the gallery client needs from durable storage: gallery records
/// plus the image bytes they point at.
///
/// Exactly one implementation is wired in at startup (see [`crate::from_config`]).
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Lists items, newest first, restricted to `category` when given
    async fn list(&self, category: Option<Category>) -> Result<Vec<GalleryItem>, StorageError>;

    /// Fetches a single item; a missing id is `Ok(None)`
    async fn get(&self, id: &str) -> Result<Option<GalleryItem>, StorageError>;

    /// Persists a record, assigning id and timestamps
    async fn insert(&self, item: NewGalleryItem) -> Result<GalleryItem, StorageError>;

    /// Persists several records. Not every backend makes this atomic.
    async fn insert_many(&self, items: Vec<NewGalleryItem>) -> Result<Vec<GalleryItem>, StorageError>;

    /// Applies a partial update, fails with `NotFound` for unknown ids
    async fn update(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem, StorageError>;

    /// Removes a record, fails with `NotFound` for unknown ids
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Stores image bytes, returns a URL that resolves to them
    async fn upload_asset(&self, data: Bytes, mime_type: &str) -> Result<String, StorageError>;

    /// Removes the bytes behind a URL produced by `upload_asset`
    async fn remove_asset(&self, url: &str) -> Result<(), StorageError>;

    /// Short label used in logs
    fn name(&self) -> &str;
}
