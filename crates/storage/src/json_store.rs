use crate::records::{check_new_item, check_patch, new_id, select, RecordStore};
use crate::StorageError;
use chrono::Utc;
use gallery_filesystem::FileSystem;
use gallery_models::{Category, GalleryItem, GalleryItemPatch, NewGalleryItem};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Record store backed by a single pretty-printed JSON array on disk.
///
/// Every mutation is a whole-file read-modify-write under `lock`, so
/// concurrent callers in this process never lose each other's writes.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<GalleryItem>, StorageError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&content)?)
    }

    async fn write_all(&self, items: &[GalleryItem]) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(items)?;
        FileSystem::write_atomic(&self.path, &content).await?;
        tracing::debug!("Wrote {} gallery item(s) to {}", items.len(), self.path.display());
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for JsonFileStore {
    async fn list(&self, category: Option<Category>) -> Result<Vec<GalleryItem>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(select(self.read_all().await?, category))
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryItem>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.into_iter().find(|item| item.id == id))
    }

    async fn insert(&self, item: NewGalleryItem) -> Result<GalleryItem, StorageError> {
        check_new_item(&item)?;
        let _guard = self.lock.lock().await;

        let mut items = self.read_all().await?;
        let stored = item.into_item(new_id(), Utc::now());
        items.push(stored.clone());
        self.write_all(&items).await?;

        Ok(stored)
    }

    async fn insert_many(&self, new_items: Vec<NewGalleryItem>) -> Result<Vec<GalleryItem>, StorageError> {
        for item in &new_items {
            check_new_item(item)?;
        }
        let _guard = self.lock.lock().await;

        let mut items = self.read_all().await?;
        let now = Utc::now();
        let stored: Vec<GalleryItem> = new_items
            .into_iter()
            .map(|item| item.into_item(new_id(), now))
            .collect();
        items.extend(stored.iter().cloned());
        self.write_all(&items).await?;

        Ok(stored)
    }

    async fn update(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem, StorageError> {
        check_patch(&patch)?;
        let _guard = self.lock.lock().await;

        let mut items = self.read_all().await?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        item.apply(patch, Utc::now());
        let updated = item.clone();
        self.write_all(&items).await?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let mut items = self.read_all().await?;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        items.remove(index);
        self.write_all(&items).await
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
