use crate::policy::UploadPolicy;
use crate::{GalleryError, Result};
use futures::future::join_all;
use gallery_models::{Category, CategoryFilter, GalleryItem, GalleryItemPatch, GalleryUploadRequest};
use gallery_storage::{StorageBackend, StorageError};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Stateless facade over the configured storage backend.
///
/// Cloning is cheap; every clone talks to the same backend.
#[derive(Clone)]
pub struct GalleryService {
    backend: Arc<dyn StorageBackend>,
    policy: UploadPolicy,
    timeout: Option<Duration>,
}

impl GalleryService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            policy: UploadPolicy::default(),
            timeout: None,
        }
    }

    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bounds every backend call; `None` waits forever
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    async fn call<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = std::result::Result<T, StorageError>>,
    ) -> Result<T> {
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result.map_err(GalleryError::from),
                Err(_) => Err(GalleryError::BackendUnavailable(format!(
                    "{} timed out after {:?}",
                    operation, limit
                ))),
            },
            None => fut.await.map_err(GalleryError::from),
        }
    }

    pub async fn list_items(&self, filter: impl Into<CategoryFilter>) -> Result<Vec<GalleryItem>> {
        let filter = filter.into();
        let mut items = self.call("list", self.backend.list(filter.category())).await?;
        items.retain(|item| filter.matches(item.category));

        tracing::debug!("Listed {} item(s) for {}", items.len(), filter);
        Ok(items)
    }

    pub async fn get_item(&self, id: &str) -> Result<Option<GalleryItem>> {
        self.call("get", self.backend.get(id)).await
    }

    /// Uploads the file, then stores the record pointing at it.
    /// A failed insert removes the uploaded asset again.
    pub async fn create_item(&self, request: GalleryUploadRequest) -> Result<GalleryItem> {
        self.validate(&request)?;

        let url = self
            .call(
                "upload_asset",
                self.backend.upload_asset(request.file.data.clone(), &request.file.mime_type),
            )
            .await?;

        match self.call("insert", self.backend.insert(request.to_new_item(url.clone()))).await {
            Ok(item) => {
                tracing::info!("Created gallery item {} ({})", item.id, item.category);
                Ok(item)
            }
            Err(e) => {
                self.discard_asset(&url).await;
                Err(e)
            }
        }
    }

    /// Uploads every asset concurrently and stores all records in one call.
    ///
    /// Any failed upload fails the whole batch once every upload has settled.
    /// Assets already uploaded for the other indices are left in place.
    pub async fn create_items_batch(&self, requests: Vec<GalleryUploadRequest>) -> Result<Vec<GalleryItem>> {
        if requests.is_empty() {
            return Err(GalleryError::ValidationFailed("batch contains no files".to_string()));
        }
        for (index, request) in requests.iter().enumerate() {
            self.validate(request).map_err(|e| match e {
                GalleryError::ValidationFailed(msg) => {
                    GalleryError::ValidationFailed(format!("item {}: {}", index, msg))
                }
                other => other,
            })?;
        }

        let total = requests.len();
        let uploads = join_all(requests.iter().map(|request| {
            self.call(
                "upload_asset",
                self.backend.upload_asset(request.file.data.clone(), &request.file.mime_type),
            )
        }))
        .await;

        let mut urls = Vec::with_capacity(total);
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        let mut first_error = None;
        for (index, upload) in uploads.into_iter().enumerate() {
            match upload {
                Ok(url) => {
                    succeeded.push(index);
                    urls.push(url);
                }
                Err(e) => {
                    tracing::debug!("Upload {} of batch failed: {}", index, e);
                    failed.push(index);
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(source) = first_error {
            if !urls.is_empty() {
                tracing::warn!(
                    "Batch upload failed for {} of {} file(s); leaving {} orphaned asset(s): {:?}",
                    failed.len(),
                    total,
                    urls.len(),
                    urls
                );
            }
            return Err(GalleryError::PartialBatchFailure {
                total,
                succeeded,
                failed,
                source: Box::new(source),
            });
        }

        let new_items = requests
            .iter()
            .zip(urls.iter())
            .map(|(request, url)| request.to_new_item(url.clone()))
            .collect();

        match self.call("insert_many", self.backend.insert_many(new_items)).await {
            Ok(items) => {
                tracing::info!("Created {} gallery item(s) in batch", items.len());
                Ok(items)
            }
            Err(e) => {
                tracing::warn!(
                    "Batch insert failed, leaving {} orphaned asset(s): {:?}",
                    urls.len(),
                    urls
                );
                Err(GalleryError::PartialBatchFailure {
                    total,
                    succeeded: Vec::new(),
                    failed: (0..total).collect(),
                    source: Box::new(e),
                })
            }
        }
    }

    pub async fn update_item(&self, id: &str, patch: GalleryItemPatch) -> Result<GalleryItem> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(GalleryError::ValidationFailed("title must not be empty".to_string()));
        }
        if patch.image_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(GalleryError::ValidationFailed("image_url must not be empty".to_string()));
        }

        self.call("update", self.backend.update(id, patch)).await
    }

    /// Removes the record, then its asset. Asset cleanup failures are only logged.
    pub async fn delete_item(&self, id: &str) -> Result<()> {
        let item = self
            .get_item(id)
            .await?
            .ok_or_else(|| GalleryError::NotFound(id.to_string()))?;

        self.call("delete", self.backend.delete(id)).await?;
        tracing::info!("Deleted gallery item {}", id);

        self.discard_asset(&item.image_url).await;
        Ok(())
    }

    pub async fn count_by_category(&self) -> Result<BTreeMap<Category, usize>> {
        let items = self.list_items(CategoryFilter::All).await?;

        let mut counts = BTreeMap::new();
        for item in &items {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn validate(&self, request: &GalleryUploadRequest) -> Result<()> {
        if request.title.trim().is_empty() {
            return Err(GalleryError::ValidationFailed(format!(
                "'{}' has an empty title",
                request.file.file_name
            )));
        }
        self.policy
            .check(&request.file.mime_type, request.file.size())
            .map_err(|reason| GalleryError::ValidationFailed(format!("'{}': {}", request.file.file_name, reason)))
    }

    async fn discard_asset(&self, url: &str) {
        if let Err(e) = self.call("remove_asset", self.backend.remove_asset(url)).await {
            tracing::warn!("Failed to remove asset {}: {}", url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{request, FlakyBackend, Memory};
    use gallery_models::FilePayload;

    #[tokio::test]
    async fn test_created_item_reads_back_equal() {
        let service = GalleryService::new(Memory::backend());
        let created = service
            .create_item(request("Food drive", Category::Community, b"jpeg"))
            .await
            .unwrap();

        let fetched = service.get_item(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.updated_at >= fetched.created_at);
        assert_eq!(fetched.description, Some("Food drive description".to_string()));
    }

    #[tokio::test]
    async fn test_category_lists_partition_the_gallery() {
        let service = GalleryService::new(Memory::backend());
        for (i, category) in Category::ALL.iter().enumerate() {
            for n in 0..=(i % 3) {
                service
                    .create_item(request(&format!("{}-{}", category, n), *category, b"png"))
                    .await
                    .unwrap();
            }
        }

        let all = service.list_items(CategoryFilter::All).await.unwrap();
        let mut union = Vec::new();
        for category in Category::ALL {
            let subset = service.list_items(category).await.unwrap();
            assert!(subset.iter().all(|item| item.category == category));
            assert!(subset.iter().all(|item| all.contains(item)));
            union.extend(subset);
        }

        let mut union_ids: Vec<_> = union.iter().map(|item| item.id.clone()).collect();
        let mut all_ids: Vec<_> = all.iter().map(|item| item.id.clone()).collect();
        union_ids.sort();
        all_ids.sort();
        assert_eq!(union_ids, all_ids);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_absent() {
        let service = GalleryService::new(Memory::backend());
        let item = service
            .create_item(request("Walkathon", Category::Fundraising, b"gif"))
            .await
            .unwrap();

        service.delete_item(&item.id).await.unwrap();
        assert_eq!(service.get_item(&item.id).await.unwrap(), None);
        assert!(matches!(
            service.delete_item(&item.id).await,
            Err(GalleryError::NotFound(id)) if id == item.id
        ));
    }

    #[tokio::test]
    async fn test_counts_sum_to_total_without_zeros() {
        let service = GalleryService::new(Memory::backend());
        for (title, category) in [
            ("a", Category::Events),
            ("b", Category::Events),
            ("c", Category::Team),
            ("d", Category::Healthcare),
        ] {
            service.create_item(request(title, category, b"x")).await.unwrap();
        }

        let counts = service.count_by_category().await.unwrap();
        assert_eq!(counts.values().sum::<usize>(), 4);
        assert!(counts.values().all(|count| *count > 0));
        assert_eq!(counts.get(&Category::Events), Some(&2));
        assert_eq!(counts.get(&Category::Causes), None);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_backend() {
        let backend = FlakyBackend::new();
        let service = GalleryService::new(backend.clone());

        let mut bad = request("Poster", Category::Causes, b"bmp");
        bad.file = FilePayload::new("poster.bmp", "image/bmp", &b"bmp"[..]);
        assert!(matches!(
            service.create_item(bad).await,
            Err(GalleryError::ValidationFailed(_))
        ));

        let blank = request("   ", Category::Causes, b"png");
        assert!(matches!(
            service.create_item(blank).await,
            Err(GalleryError::ValidationFailed(_))
        ));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_uploaded_asset() {
        let backend = FlakyBackend::new();
        backend.fail_inserts(true);
        let service = GalleryService::new(backend.clone());

        let result = service.create_item(request("Gala", Category::Events, b"x")).await;
        assert!(matches!(result, Err(GalleryError::BackendUnavailable(_))));
        assert_eq!(backend.uploaded().len(), 1);
        assert_eq!(backend.removed(), backend.uploaded());
        assert!(service.list_items(CategoryFilter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_reports_succeeded_and_failed_indices() {
        let backend = FlakyBackend::new();
        let service = GalleryService::new(backend.clone());

        let result = service
            .create_items_batch(vec![
                request("one", Category::Events, b"ok-1"),
                request("two", Category::Events, FlakyBackend::FAIL_UPLOAD),
                request("three", Category::Events, b"ok-3"),
            ])
            .await;

        match result {
            Err(GalleryError::PartialBatchFailure {
                total,
                succeeded,
                failed,
                source,
            }) => {
                assert_eq!(total, 3);
                assert_eq!(succeeded, vec![0, 2]);
                assert_eq!(failed, vec![1]);
                assert!(matches!(*source, GalleryError::BackendUnavailable(_)));
            }
            other => panic!("expected partial batch failure, got {:?}", other),
        }

        // every upload settled before the verdict, nothing was persisted
        assert_eq!(backend.uploaded().len(), 2);
        assert!(backend.removed().is_empty());
        assert!(service.list_items(CategoryFilter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_insert_failure_fails_every_index() {
        let backend = FlakyBackend::new();
        backend.fail_inserts(true);
        let service = GalleryService::new(backend);

        let result = service
            .create_items_batch(vec![
                request("one", Category::Team, b"1"),
                request("two", Category::Team, b"2"),
            ])
            .await;

        assert!(matches!(
            result,
            Err(GalleryError::PartialBatchFailure { ref succeeded, ref failed, .. })
                if succeeded.is_empty() && failed == &vec![0, 1]
        ));
    }

    #[tokio::test]
    async fn test_empty_batch_is_validation_error() {
        let service = GalleryService::new(Memory::backend());
        assert!(matches!(
            service.create_items_batch(Vec::new()).await,
            Err(GalleryError::ValidationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_and_blank_title() {
        let service = GalleryService::new(Memory::backend());
        assert!(matches!(
            service.update_item("ghost", GalleryItemPatch::default().title("x")).await,
            Err(GalleryError::NotFound(_))
        ));

        let item = service
            .create_item(request("Clinic", Category::Healthcare, b"x"))
            .await
            .unwrap();
        assert!(matches!(
            service.update_item(&item.id, GalleryItemPatch::default().title(" ")).await,
            Err(GalleryError::ValidationFailed(_))
        ));

        let updated = service
            .update_item(&item.id, GalleryItemPatch::default().category(Category::Volunteers))
            .await
            .unwrap();
        assert_eq!(updated.category, Category::Volunteers);
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.created_at, item.created_at);
    }

    #[tokio::test]
    async fn test_asset_removal_failure_does_not_block_delete() {
        let backend = FlakyBackend::new();
        backend.fail_asset_removal(true);
        let service = GalleryService::new(backend.clone());

        let item = service
            .create_item(request("Mural", Category::Community, b"x"))
            .await
            .unwrap();
        service.delete_item(&item.id).await.unwrap();
        assert_eq!(service.get_item(&item.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_as_unavailable() {
        let backend = FlakyBackend::new();
        backend.delay_lists(Duration::from_millis(200));
        let service = GalleryService::new(backend).with_timeout(Some(Duration::from_millis(20)));

        assert!(matches!(
            service.list_items(CategoryFilter::All).await,
            Err(GalleryError::BackendUnavailable(msg)) if msg.contains("timed out")
        ));
    }
}
