use super::models::AppState;
use crate::errors::ApiError;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use bytes::Bytes;
use gallery_storage::AssetUrl;

pub async fn upload_asset(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<AssetUrl>), ApiError> {
    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::ValidationFailed("Content-Type header is required".to_string()))?;

    state
        .service
        .policy()
        .check(&mime_type, body.len() as u64)
        .map_err(|reason| ApiError::ValidationFailed(reason.to_string()))?;

    let url = state.backend.upload_asset(body, &mime_type).await?;
    tracing::debug!("upload_asset: stored {} as {}", mime_type, url);
    Ok((StatusCode::CREATED, Json(AssetUrl { url })))
}

pub async fn remove_asset(
    State(state): State<AppState>,
    Json(asset): Json<AssetUrl>,
) -> Result<StatusCode, ApiError> {
    state.backend.remove_asset(&asset.url).await?;
    Ok(StatusCode::NO_CONTENT)
}
