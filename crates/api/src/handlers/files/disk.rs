use crate::errors::ApiError;
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use tokio_util::io::ReaderStream;

/// Serves a file from disk, either by streaming or loading into memory
/// The threshold is configurable via server.streaming_threshold_mb
pub async fn serve_from_disk(full_path: PathBuf, streaming_threshold_bytes: u64) -> Result<Response, ApiError> {
    let metadata = match tokio::fs::metadata(&full_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return Err(not_found(&full_path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found(&full_path)),
        Err(e) => {
            tracing::error!("serve_asset: Failed to get metadata for '{}': {}", full_path.display(), e);
            return Err(ApiError::IoError(e));
        }
    };

    let mime_type = mime_guess::from_path(&full_path)
        .first_or_octet_stream()
        .to_string();

    if metadata.len() > streaming_threshold_bytes {
        stream_large_file(full_path, mime_type, metadata.len()).await
    } else {
        load_small_file(full_path, mime_type).await
    }
}

fn not_found(full_path: &std::path::Path) -> ApiError {
    tracing::debug!("serve_asset: File does not exist: '{}'", full_path.display());
    let name = full_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ApiError::NotFound(format!("Asset '{}' not found", name))
}

async fn stream_large_file(full_path: PathBuf, mime_type: String, file_size: u64) -> Result<Response, ApiError> {
    tracing::debug!(
        "serve_asset: streaming large file ({:.2} MB)",
        file_size as f64 / 1024.0 / 1024.0
    );

    let file = tokio::fs::File::open(&full_path).await?;
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, mime_type)], body).into_response())
}

async fn load_small_file(full_path: PathBuf, mime_type: String) -> Result<Response, ApiError> {
    let content = tokio::fs::read(&full_path).await?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, mime_type)], content).into_response())
}
