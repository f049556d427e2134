use crate::{GalleryError, GalleryService, Result};
use gallery_models::{CategoryFilter, GalleryItem};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Retryable message from the last failed refresh
    Error(String),
}

/// Point-in-time copy of everything a presentation layer renders
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    pub state: ViewState,
    pub items: Vec<GalleryItem>,
    pub filter: CategoryFilter,
    /// Failure of the last delete, cleared by the next successful one or a filter change
    pub transient_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh was issued while this one was in flight
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

/// Asks the user whether an item should really be deleted
#[async_trait::async_trait]
pub trait DeleteConfirmation: Send + Sync {
    async fn confirm(&self, item: &GalleryItem) -> bool;
}

#[async_trait::async_trait]
impl<F> DeleteConfirmation for F
where
    F: Fn(&GalleryItem) -> bool + Send + Sync,
{
    async fn confirm(&self, item: &GalleryItem) -> bool {
        self(item)
    }
}

/// The client's working copy of the gallery.
///
/// State is only ever touched under `state`, and that lock is never held
/// across a backend call. Each refresh takes a sequence number; a response is
/// applied only if no newer refresh was issued in the meantime, and never
/// brings back an item deleted while it was in flight.
pub struct GalleryViewModel {
    service: GalleryService,
    state: Mutex<ViewSnapshot>,
    sequence: AtomicU64,
    /// Ids deleted since the last applied refresh; only locked while holding `state`
    deleted: Mutex<Vec<String>>,
}

impl GalleryViewModel {
    pub fn new(service: GalleryService) -> Self {
        Self {
            service,
            state: Mutex::new(ViewSnapshot::default()),
            sequence: AtomicU64::new(0),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().clone()
    }

    pub fn items(&self) -> Vec<GalleryItem> {
        self.state.lock().items.clone()
    }

    pub fn state(&self) -> ViewState {
        self.state.lock().state.clone()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.state.lock().filter
    }

    pub fn total_images(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn dismiss_error(&self) {
        self.state.lock().transient_error = None;
    }

    /// Reloads the list for the active filter.
    ///
    /// On failure the previous list stays visible and the state becomes `Error`.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let (filter, deleted_before) = {
            let mut state = self.state.lock();
            state.state = ViewState::Loading;
            (state.filter, self.deleted.lock().len())
        };

        let result = self.service.list_items(filter).await;

        let mut state = self.state.lock();
        if self.sequence.load(Ordering::SeqCst) != seq {
            tracing::debug!("Discarding superseded refresh #{} for {}", seq, filter);
            return Ok(RefreshOutcome::Superseded);
        }

        match result {
            Ok(mut items) => {
                let mut deleted = self.deleted.lock();
                if let Some(since) = deleted.get(deleted_before..) {
                    items.retain(|item| !since.contains(&item.id));
                }
                deleted.clear();
                tracing::debug!("Refresh #{} loaded {} item(s) for {}", seq, items.len(), filter);
                state.items = items;
                state.state = ViewState::Loaded;
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!("Refresh #{} for {} failed: {}", seq, filter, e);
                state.state = ViewState::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Switches the active filter, clears any displayed error and reloads
    pub async fn set_filter(&self, filter: impl Into<CategoryFilter>) -> Result<RefreshOutcome> {
        {
            let mut state = self.state.lock();
            state.filter = filter.into();
            state.transient_error = None;
            if matches!(state.state, ViewState::Error(_)) {
                state.state = ViewState::Idle;
            }
        }
        self.refresh().await
    }

    /// Deletes after explicit confirmation; the local list changes only once the backend agrees
    pub async fn request_delete(&self, id: &str, confirmation: &dyn DeleteConfirmation) -> Result<DeleteOutcome> {
        let item = self.state.lock().items.iter().find(|item| item.id == id).cloned();
        let item = match item {
            Some(item) => item,
            None => self
                .service
                .get_item(id)
                .await?
                .ok_or_else(|| GalleryError::NotFound(id.to_string()))?,
        };

        if !confirmation.confirm(&item).await {
            tracing::debug!("Delete of {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.service.delete_item(id).await {
            Ok(()) => {
                let mut state = self.state.lock();
                state.items.retain(|item| item.id != id);
                state.transient_error = None;
                self.deleted.lock().push(id.to_string());
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                self.state.lock().transient_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FlakyBackend;
    use gallery_models::Category;
    use gallery_storage::StorageBackend;
    use std::sync::Arc;

    fn yes(_: &GalleryItem) -> bool {
        true
    }

    fn no(_: &GalleryItem) -> bool {
        false
    }

    #[tokio::test]
    async fn test_starts_idle_and_loads() {
        let backend = FlakyBackend::new();
        backend.seed("a", Category::Team).await;
        let vm = GalleryViewModel::new(GalleryService::new(backend));

        assert_eq!(vm.state(), ViewState::Idle);
        assert_eq!(vm.refresh().await.unwrap(), RefreshOutcome::Applied);
        assert_eq!(vm.state(), ViewState::Loaded);
        assert_eq!(vm.total_images(), 1);
    }

    #[tokio::test]
    async fn test_filter_change_queries_backend_without_leakage() {
        let backend = FlakyBackend::new();
        backend.seed("clinic", Category::Healthcare).await;
        backend.seed("gala", Category::Fundraising).await;
        backend.seed("vaccines", Category::Healthcare).await;
        let vm = GalleryViewModel::new(GalleryService::new(backend.clone()));

        vm.set_filter(CategoryFilter::All).await.unwrap();
        assert_eq!(vm.total_images(), 3);
        let calls = backend.calls();

        vm.set_filter(Category::Healthcare).await.unwrap();
        assert_eq!(backend.calls(), calls + 1);

        let snapshot = vm.snapshot();
        assert_eq!(snapshot.state, ViewState::Loaded);
        assert_eq!(snapshot.filter, CategoryFilter::Only(Category::Healthcare));
        assert_eq!(snapshot.items.len(), 2);
        assert!(snapshot.items.iter().all(|item| item.category == Category::Healthcare));
    }

    #[tokio::test]
    async fn test_stale_refresh_is_discarded() {
        let backend = FlakyBackend::new();
        backend.seed("clinic", Category::Healthcare).await;
        backend.seed("parade", Category::Events).await;
        backend.gate_unfiltered_lists(true);
        let vm = Arc::new(GalleryViewModel::new(GalleryService::new(backend.clone())));

        let stale = tokio::spawn({
            let vm = vm.clone();
            async move { vm.refresh().await }
        });
        backend.entered.notified().await;

        assert_eq!(
            vm.set_filter(Category::Healthcare).await.unwrap(),
            RefreshOutcome::Applied
        );

        backend.release.notify_one();
        assert_eq!(stale.await.unwrap().unwrap(), RefreshOutcome::Superseded);

        let snapshot = vm.snapshot();
        assert_eq!(snapshot.state, ViewState::Loaded);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].category, Category::Healthcare);
    }

    #[tokio::test]
    async fn test_delete_during_refresh_stays_deleted() {
        let backend = FlakyBackend::new();
        let gone = backend.seed("gone", Category::Events).await;
        backend.seed("kept", Category::Events).await;
        let vm = Arc::new(GalleryViewModel::new(GalleryService::new(backend.clone())));
        vm.refresh().await.unwrap();

        backend.gate_unfiltered_lists(true);
        let in_flight = tokio::spawn({
            let vm = vm.clone();
            async move { vm.refresh().await }
        });
        // the in-flight list already holds both items
        backend.entered.notified().await;

        assert_eq!(vm.request_delete(&gone.id, &yes).await.unwrap(), DeleteOutcome::Deleted);

        backend.release.notify_one();
        assert_eq!(in_flight.await.unwrap().unwrap(), RefreshOutcome::Applied);

        let titles: Vec<_> = vm.items().into_iter().map(|item| item.title).collect();
        assert_eq!(titles, vec!["kept"]);
        assert_eq!(vm.state(), ViewState::Loaded);

        backend.gate_unfiltered_lists(false);
        vm.refresh().await.unwrap();
        assert_eq!(vm.total_images(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_list() {
        let backend = FlakyBackend::new();
        backend.seed("a", Category::Events).await;
        let vm = GalleryViewModel::new(GalleryService::new(backend.clone()));
        vm.refresh().await.unwrap();

        backend.fail_lists(true);
        let err = vm.refresh().await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(vm.state(), ViewState::Error(_)));
        assert_eq!(vm.total_images(), 1);

        backend.fail_lists(false);
        vm.set_filter(CategoryFilter::All).await.unwrap();
        assert_eq!(vm.state(), ViewState::Loaded);
    }

    #[tokio::test]
    async fn test_declined_delete_makes_no_backend_call() {
        let backend = FlakyBackend::new();
        let item = backend.seed("a", Category::Events).await;
        let vm = GalleryViewModel::new(GalleryService::new(backend.clone()));
        vm.refresh().await.unwrap();
        let calls = backend.calls();

        assert_eq!(vm.request_delete(&item.id, &no).await.unwrap(), DeleteOutcome::Cancelled);
        assert_eq!(backend.calls(), calls);
        assert_eq!(vm.total_images(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete_updates_list_without_refetch() {
        let backend = FlakyBackend::new();
        let gone = backend.seed("gone", Category::Events).await;
        backend.seed("kept", Category::Events).await;
        let vm = GalleryViewModel::new(GalleryService::new(backend.clone()));
        vm.refresh().await.unwrap();

        assert_eq!(vm.request_delete(&gone.id, &yes).await.unwrap(), DeleteOutcome::Deleted);
        let titles: Vec<_> = vm.items().into_iter().map(|item| item.title).collect();
        assert_eq!(titles, vec!["kept"]);
        assert_eq!(vm.state(), ViewState::Loaded);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_and_sets_transient_error() {
        let backend = FlakyBackend::new();
        let item = backend.seed("a", Category::Events).await;
        let vm = GalleryViewModel::new(GalleryService::new(backend.clone()));
        vm.refresh().await.unwrap();

        // removed behind the view model's back
        backend.delete(&item.id).await.unwrap();

        let result = vm.request_delete(&item.id, &yes).await;
        assert!(matches!(result, Err(GalleryError::NotFound(_))));
        assert_eq!(vm.total_images(), 1);
        assert!(vm.snapshot().transient_error.is_some());

        vm.set_filter(Category::Team).await.unwrap();
        assert_eq!(vm.snapshot().transient_error, None);
    }
}
