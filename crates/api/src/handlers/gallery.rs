use super::models::AppState;
use crate::errors::ApiError;
use crate::models::{CountsResponse, ListQuery, MessageResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use gallery_client::GalleryService;
use gallery_models::{CategoryFilter, GalleryItem, GalleryItemPatch, NewGalleryItem};

pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<GalleryItem>>, ApiError> {
    let filter = match query.category.as_deref() {
        Some(raw) => raw
            .parse::<CategoryFilter>()
            .map_err(|e| ApiError::ValidationFailed(e.to_string()))?,
        None => CategoryFilter::All,
    };

    let items = state.service.list_items(filter).await?;
    tracing::debug!("list_items: {} item(s) for {}", items.len(), filter);
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GalleryItem>, ApiError> {
    state
        .service
        .get_item(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Gallery item '{}' not found", id)))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(item): Json<NewGalleryItem>,
) -> Result<(StatusCode, Json<GalleryItem>), ApiError> {
    let created = state.backend.insert(item).await?;
    tracing::info!("Created gallery item {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_items_bulk(
    State(state): State<AppState>,
    Json(items): Json<Vec<NewGalleryItem>>,
) -> Result<(StatusCode, Json<Vec<GalleryItem>>), ApiError> {
    if items.is_empty() {
        return Err(ApiError::ValidationFailed("bulk insert needs at least one item".to_string()));
    }

    let created = state.backend.insert_many(items).await?;
    tracing::info!("Created {} gallery item(s) in bulk", created.len());
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<GalleryItemPatch>,
) -> Result<Json<GalleryItem>, ApiError> {
    let updated = state.service.update_item(&id, patch).await?;
    Ok(Json(updated))
}

/// Removes the record only; clients clean up the asset through `/api/assets`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.backend.delete(&id).await?;
    tracing::info!("Deleted gallery item {}", id);
    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}

pub async fn count_items(State(service): State<GalleryService>) -> Result<Json<CountsResponse>, ApiError> {
    let counts = service.count_by_category().await?;
    Ok(Json(CountsResponse {
        total: counts.values().sum(),
        counts,
    }))
}
