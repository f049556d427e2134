use crate::records::{check_new_item, check_patch, new_id, select, RecordStore};
use crate::StorageError;
use chrono::Utc;
use dashmap::DashMap;
use gallery_models::{Category, GalleryItem, GalleryItemPatch, NewGalleryItem};

/// Key/value record store kept in process memory.
///
/// Plays the role of browser local storage: fast, private to one process,
/// gone on restart.
#[derive(Default)]
pub struct MemoryStore {
    items: DashMap<String, GalleryItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, category: Option<Category>) -> Result<Vec<GalleryItem>, StorageError> {
        Ok(select(
            self.items.iter().map(|entry| entry.value().clone()),
            category,
        ))
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryItem>, StorageError> {
        Ok(self.items.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, item: NewGalleryItem) -> Result<GalleryItem, StorageError> {
        check_new_item(&item)?;
        let stored = item.into_item(new_id(), Utc::now());
        self.items.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn insert_many(&self, items: Vec<NewGalleryItem>) -> Result<Vec<GalleryItem>, StorageError> {
        for item in &items {
            check_new_item(item)?;
        }

        let now = Utc::now();
        let stored: Vec<GalleryItem> = items
            .into_iter()
            .map(|item| item.into_item(new_id(), now))
            .collect();
        for item in &stored {
            self.items.insert(item.id.clone(), item.clone());
        }
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem, StorageError> {
        check_patch(&patch)?;
        let mut entry = self
            .items
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        entry.apply(patch, Utc::now());
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.items
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
