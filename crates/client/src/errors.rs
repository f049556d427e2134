use gallery_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Gallery item not found: {0}")]
    NotFound(String),

    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Batch failed: {} of {total} item(s) failed, first error: {source}", .failed.len())]
    PartialBatchFailure {
        total: usize,
        succeeded: Vec<usize>,
        failed: Vec<usize>,
        source: Box<GalleryError>,
    },
}

impl GalleryError {
    /// Errors the user can clear by retrying the same action
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GalleryError::BackendUnavailable(_) | GalleryError::PartialBatchFailure { .. }
        )
    }
}

impl From<StorageError> for GalleryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => GalleryError::NotFound(id),
            StorageError::AssetNotFound(url) => GalleryError::NotFound(url),
            StorageError::InvalidRecord(msg) | StorageError::InvalidKey(msg) => {
                GalleryError::ValidationFailed(msg)
            }
            other => GalleryError::BackendUnavailable(other.to_string()),
        }
    }
}
