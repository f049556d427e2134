//! Storage doubles for the client tests.

use bytes::Bytes;
use gallery_models::{
    Category, FilePayload, GalleryItem, GalleryItemPatch, GalleryUploadRequest, NewGalleryItem,
};
use gallery_storage::{StorageBackend, StorageError, StoreBackend};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub struct Memory;

impl Memory {
    pub fn backend() -> Arc<dyn StorageBackend> {
        Arc::new(StoreBackend::in_memory())
    }
}

pub fn request(title: &str, category: Category, data: &'static [u8]) -> GalleryUploadRequest {
    GalleryUploadRequest {
        title: title.to_string(),
        category,
        description: Some(format!("{} description", title)),
        file: FilePayload::new(format!("{}.jpg", title), "image/jpeg", data),
    }
}

/// In-memory backend that can be told to fail, stall or hold list calls
pub struct FlakyBackend {
    inner: StoreBackend,
    calls: AtomicUsize,
    fail_inserts: AtomicBool,
    fail_lists: AtomicBool,
    fail_removal: AtomicBool,
    gate_unfiltered: AtomicBool,
    list_delay: Mutex<Option<Duration>>,
    uploaded: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
    pub entered: Notify,
    pub release: Notify,
}

impl FlakyBackend {
    /// Upload payload the backend always refuses
    pub const FAIL_UPLOAD: &'static [u8] = b"fail-upload";

    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: StoreBackend::in_memory(),
            calls: AtomicUsize::new(0),
            fail_inserts: AtomicBool::new(false),
            fail_lists: AtomicBool::new(false),
            fail_removal: AtomicBool::new(false),
            gate_unfiltered: AtomicBool::new(false),
            list_delay: Mutex::new(None),
            uploaded: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_asset_removal(&self, fail: bool) {
        self.fail_removal.store(fail, Ordering::SeqCst);
    }

    /// Unfiltered lists read their result, signal `entered` and then wait for `release`
    pub fn gate_unfiltered_lists(&self, gate: bool) {
        self.gate_unfiltered.store(gate, Ordering::SeqCst);
    }

    pub fn delay_lists(&self, delay: Duration) {
        *self.list_delay.lock() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().clone()
    }

    /// Inserts directly, bypassing call counting and failure switches
    pub async fn seed(&self, title: &str, category: Category) -> GalleryItem {
        self.inner
            .insert(NewGalleryItem {
                title: title.to_string(),
                category,
                description: None,
                image_url: format!("data:image/png;base64,{}", title),
                user_id: None,
            })
            .await
            .unwrap()
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn refused(what: &str) -> StorageError {
        StorageError::HttpError(format!("{} refused", what))
    }
}

#[async_trait::async_trait]
impl StorageBackend for FlakyBackend {
    async fn list(&self, category: Option<Category>) -> Result<Vec<GalleryItem>, StorageError> {
        self.count();
        let delay = *self.list_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Self::refused("list"));
        }
        let items = self.inner.list(category).await?;
        if category.is_none() && self.gate_unfiltered.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<Option<GalleryItem>, StorageError> {
        self.count();
        self.inner.get(id).await
    }

    async fn insert(&self, item: NewGalleryItem) -> Result<GalleryItem, StorageError> {
        self.count();
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(Self::refused("insert"));
        }
        self.inner.insert(item).await
    }

    async fn insert_many(&self, items: Vec<NewGalleryItem>) -> Result<Vec<GalleryItem>, StorageError> {
        self.count();
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(Self::refused("insert_many"));
        }
        self.inner.insert_many(items).await
    }

    async fn update(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem, StorageError> {
        self.count();
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.count();
        self.inner.delete(id).await
    }

    async fn upload_asset(&self, data: Bytes, mime_type: &str) -> Result<String, StorageError> {
        self.count();
        if data.as_ref() == Self::FAIL_UPLOAD {
            return Err(Self::refused("upload"));
        }
        let url = self.inner.upload_asset(data, mime_type).await?;
        self.uploaded.lock().push(url.clone());
        Ok(url)
    }

    async fn remove_asset(&self, url: &str) -> Result<(), StorageError> {
        self.count();
        self.removed.lock().push(url.to_string());
        if self.fail_removal.load(Ordering::SeqCst) {
            return Err(Self::refused("remove_asset"));
        }
        self.inner.remove_asset(url).await
    }

    fn name(&self) -> &str {
        "flaky"
    }
}
