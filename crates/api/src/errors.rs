use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use gallery_client::GalleryError;
use gallery_storage::StorageError;
use thiserror::Error;

use crate::models::{ErrorDetail, ErrorResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("{message}")]
    PartialBatchFailure {
        message: String,
        succeeded: Vec<usize>,
        failed: Vec<usize>,
    },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => ApiError::NotFound(format!("Gallery item '{}' not found", id)),
            StorageError::AssetNotFound(key) => ApiError::NotFound(format!("Asset '{}' not found", key)),
            StorageError::InvalidRecord(msg) => ApiError::ValidationFailed(msg),
            StorageError::InvalidKey(key) => ApiError::InvalidPath(format!("Invalid asset key '{}'", key)),
            StorageError::HttpError(msg) | StorageError::ConfigError(msg) => ApiError::BackendUnavailable(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<GalleryError> for ApiError {
    fn from(err: GalleryError) -> Self {
        match err {
            GalleryError::ValidationFailed(msg) => ApiError::ValidationFailed(msg),
            GalleryError::NotFound(id) => ApiError::NotFound(format!("Gallery item '{}' not found", id)),
            GalleryError::BackendUnavailable(msg) => ApiError::BackendUnavailable(msg),
            GalleryError::PartialBatchFailure { total, succeeded, failed, source } => ApiError::PartialBatchFailure {
                message: format!("{} of {} item(s) failed: {}", failed.len(), total, source),
                succeeded,
                failed,
            },
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            ApiError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "INVALID_PATH"),
            ApiError::BackendUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE"),
            ApiError::PartialBatchFailure { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "PARTIAL_BATCH_FAILURE"),
            ApiError::InternalError(_) | ApiError::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("{}: {}", code, self);
        } else {
            tracing::debug!("{}: {}", code, self);
        }

        let (message, succeeded, failed) = match self {
            ApiError::NotFound(msg)
            | ApiError::ValidationFailed(msg)
            | ApiError::InvalidPath(msg)
            | ApiError::BackendUnavailable(msg)
            | ApiError::InternalError(msg) => (msg, None, None),
            ApiError::PartialBatchFailure { message, succeeded, failed } => {
                (message, Some(succeeded), Some(failed))
            }
            ApiError::IoError(err) => (err.to_string(), None, None),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                succeeded,
                failed,
            },
        };

        (status, Json(body)).into_response()
    }
}
