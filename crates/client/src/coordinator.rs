use crate::policy::Screened;
use crate::{GalleryError, GalleryService, Result};
use gallery_models::{Category, FilePayload, GalleryItem, GalleryUploadRequest};

/// What the user filled in on the upload form
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub category: Option<Category>,
    /// Only honored when exactly one file survives screening
    pub title: Option<String>,
    pub description: Option<String>,
    pub files: Vec<FilePayload>,
}

/// Turns an upload form into a validated batch and hands it to the service
#[derive(Clone)]
pub struct UploadCoordinator {
    service: GalleryService,
}

impl UploadCoordinator {
    pub fn new(service: GalleryService) -> Self {
        Self { service }
    }

    /// Splits files by the upload policy, with a reason for every rejection
    pub fn screen(&self, files: Vec<FilePayload>) -> Screened {
        self.service.policy().screen(files)
    }

    /// Builds one request per accepted file.
    ///
    /// Rejected files are dropped without failing the batch. No backend call is made.
    pub fn build_requests(&self, form: UploadForm) -> Result<Vec<GalleryUploadRequest>> {
        let category = form
            .category
            .ok_or_else(|| GalleryError::ValidationFailed("a category must be selected".to_string()))?;

        let screened = self.screen(form.files);
        for rejection in &screened.rejected {
            tracing::debug!("Dropping {} from upload: {}", rejection.file_name, rejection.reason);
        }
        if screened.accepted.is_empty() {
            return Err(GalleryError::ValidationFailed(
                "no acceptable image files selected".to_string(),
            ));
        }

        let description = form
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let explicit_title = form
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && screened.accepted.len() == 1);

        Ok(screened
            .accepted
            .into_iter()
            .map(|file| GalleryUploadRequest {
                title: explicit_title.clone().unwrap_or_else(|| default_title(&file.file_name)),
                category,
                description: description.clone(),
                file,
            })
            .collect())
    }

    pub async fn upload(&self, form: UploadForm) -> Result<Vec<GalleryItem>> {
        let requests = self.build_requests(form)?;
        tracing::info!("Uploading batch of {} file(s)", requests.len());
        self.service.create_items_batch(requests).await
    }
}

/// File name without its last extension.
///
/// An extension is a dot followed by at least one character that is neither a
/// dot nor a slash. Names that would end up empty (`.hidden`) are kept whole.
pub fn default_title(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 && is_extension(&file_name[dot + 1..]) => file_name[..dot].to_string(),
        _ => file_name.to_string(),
    }
}

fn is_extension(ext: &str) -> bool {
    !ext.is_empty() && !ext.contains('/')
}
