use super::models::AppState;
use axum::extract::FromRef;
use gallery_client::{GalleryService, UploadCoordinator};
use std::path::PathBuf;
use std::sync::Arc;

impl AppState {
    pub fn new(service: GalleryService, assets_dir: impl Into<PathBuf>, streaming_threshold_mb: u64) -> Self {
        Self {
            backend: Arc::clone(service.backend()),
            coordinator: UploadCoordinator::new(service.clone()),
            service,
            assets_dir: Arc::new(assets_dir.into()),
            streaming_threshold_bytes: streaming_threshold_mb * 1024 * 1024,
        }
    }
}

impl FromRef<AppState> for GalleryService {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}
