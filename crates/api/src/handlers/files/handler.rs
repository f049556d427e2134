use super::{disk, validator::validate_path_component};
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};

/// Serves a file written by the local asset store
pub async fn serve_asset(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let key = key.trim_start_matches('/');
    tracing::debug!("serve_asset: key = '{}'", key);

    if key.is_empty() {
        return Err(ApiError::NotFound("Asset key is empty".to_string()));
    }
    validate_path_component(key)?;

    disk::serve_from_disk(state.assets_dir.join(key), state.streaming_threshold_bytes).await
}
