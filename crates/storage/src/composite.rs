use crate::assets::{generate_key, AssetStore};
use crate::backend::StorageBackend;
use crate::records::RecordStore;
use crate::StorageError;
use bytes::Bytes;
use gallery_models::{Category, GalleryItem, GalleryItemPatch, NewGalleryItem};
use std::sync::Arc;

/// Storage backend made of one record store and one asset store
pub struct StoreBackend {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
    label: String,
}

impl StoreBackend {
    pub fn new(records: Arc<dyn RecordStore>, assets: Arc<dyn AssetStore>) -> Self {
        let label = format!("{}+{}", records.name(), assets.name());
        Self { records, assets, label }
    }

    /// Memory records with inline data URLs, nothing touches disk
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::MemoryStore::new()),
            Arc::new(crate::DataUriAssetStore::new()),
        )
    }
}

#[async_trait::async_trait]
impl StorageBackend for StoreBackend {
    async fn list(&self, category: Option<Category>) -> Result<Vec<GalleryItem>, StorageError> {
        self.records.list(category).await
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryItem>, StorageError> {
        self.records.get(id).await
    }

    async fn insert(&self, item: NewGalleryItem) -> Result<GalleryItem, StorageError> {
        self.records.insert(item).await
    }

    async fn insert_many(&self, items: Vec<NewGalleryItem>) -> Result<Vec<GalleryItem>, StorageError> {
        self.records.insert_many(items).await
    }

    async fn update(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem, StorageError> {
        self.records.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.records.delete(id).await
    }

    async fn upload_asset(&self, data: Bytes, mime_type: &str) -> Result<String, StorageError> {
        let key = generate_key(mime_type);
        self.assets.upload(data, mime_type, &key).await
    }

    async fn remove_asset(&self, url: &str) -> Result<(), StorageError> {
        match self.assets.key_from_url(url) {
            Some(key) => self.assets.delete(&key).await,
            None => {
                tracing::debug!("No stored object behind {}, nothing to remove", truncate(url));
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}

fn truncate(url: &str) -> &str {
    match url.char_indices().nth(64) {
        Some((end, _)) => &url[..end],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocalAssetStore, MemoryStore};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_in_memory_backend_round_trip() {
        let backend = StoreBackend::in_memory();
        assert_eq!(backend.name(), "memory+data_uri");

        let url = backend
            .upload_asset(Bytes::from_static(b"\x89PNG"), "image/png")
            .await
            .unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let item = backend
            .insert(NewGalleryItem {
                title: "Beach cleanup".to_string(),
                category: Category::Environment,
                description: None,
                image_url: url.clone(),
                user_id: None,
            })
            .await
            .unwrap();

        assert_eq!(backend.list(Some(Category::Environment)).await.unwrap(), vec![item.clone()]);
        backend.delete(&item.id).await.unwrap();
        backend.remove_asset(&url).await.unwrap();
        assert!(backend.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_local_assets_are_removed_by_url() {
        let temp = TempDir::new().unwrap();
        let backend = StoreBackend::new(
            Arc::new(MemoryStore::new()),
            Arc::new(LocalAssetStore::new(temp.path(), "http://localhost:8080/assets")),
        );

        let url = backend
            .upload_asset(Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();
        let key = url.rsplit('/').next().unwrap().to_string();
        assert!(key.ends_with(".jpg"));
        assert!(temp.path().join(&key).exists());

        backend.remove_asset(&url).await.unwrap();
        assert!(!temp.path().join(&key).exists());
    }
}
