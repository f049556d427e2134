mod coordinator;
mod errors;
mod policy;
mod service;
mod view_model;

#[cfg(test)]
mod testing;

pub use coordinator::{default_title, UploadCoordinator, UploadForm};
pub use errors::{GalleryError, Result};
pub use policy::{Rejection, RejectionReason, Screened, UploadPolicy, DEFAULT_ALLOWED_MIME_TYPES, DEFAULT_MAX_FILE_SIZE};
pub use service::GalleryService;
pub use view_model::{DeleteConfirmation, DeleteOutcome, GalleryViewModel, RefreshOutcome, ViewSnapshot, ViewState};
