use super::models::AppState;
use crate::errors::ApiError;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use gallery_client::UploadForm;
use gallery_models::{Category, FilePayload, GalleryItem};

/// Multipart upload form: `category`, optional `title` and `description`,
/// and any number of file parts
pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<GalleryItem>>), ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::ValidationFailed(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let mime_type = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| mime_guess::from_path(&file_name).first_or_octet_stream().to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::ValidationFailed(e.to_string()))?;
            form.files.push(FilePayload::new(file_name, mime_type, data));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::ValidationFailed(e.to_string()))?;
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match name.as_str() {
            "category" => {
                form.category = Some(
                    value
                        .parse::<Category>()
                        .map_err(|e| ApiError::ValidationFailed(e.to_string()))?,
                )
            }
            "title" => form.title = Some(value.to_string()),
            "description" => form.description = Some(value.to_string()),
            other => tracing::debug!("upload_images: ignoring form field '{}'", other),
        }
    }

    let items = state.coordinator.upload(form).await?;
    Ok((StatusCode::CREATED, Json(items)))
}
