use gallery_client::{GalleryService, UploadCoordinator};
use gallery_storage::StorageBackend;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) backend: Arc<dyn StorageBackend>,
    pub(super) service: GalleryService,
    pub(super) coordinator: UploadCoordinator,
    pub(super) assets_dir: Arc<PathBuf>,
    pub(super) streaming_threshold_bytes: u64,
}
