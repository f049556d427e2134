use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Upload failed for '{0}': {1}")]
    UploadError(String, String),

    #[error("Delete failed for '{0}': {1}")]
    DeleteError(String, String),

    #[error("Invalid storage configuration: {0}")]
    ConfigError(String),

    #[error("Gallery item not found: {0}")]
    NotFound(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid asset key: {0}")]
    InvalidKey(String),

    #[error("HTTP request failed: {0}")]
    HttpError(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::HttpError(err.to_string())
    }
}
