// Re-export all public APIs from the workspace crates

pub use gallery_models::*;
pub use gallery_events::*;
pub use gallery_filesystem::*;
pub use gallery_config::*;
pub use gallery_storage::*;
pub use gallery_client::*;
pub use gallery_api::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Core models
    pub use gallery_models::{Category, CategoryFilter, FilePayload, GalleryItem, GalleryItemPatch, NewGalleryItem};

    // Events
    pub use gallery_events::{AppEvent, EventBus};

    // Configuration
    pub use gallery_config::Config;

    // Storage
    pub use gallery_storage::{from_config, StorageBackend, StorageError};

    // Client
    pub use gallery_client::{GalleryError, GalleryService, GalleryViewModel, UploadCoordinator, UploadForm, UploadPolicy};

    // Filesystem
    pub use gallery_filesystem::FileSystem;
}
