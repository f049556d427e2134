use crate::{Category, NewGalleryItem};
use bytes::Bytes;
use std::fmt;

/// Raw file bytes with the MIME type declared by whoever selected the file.
#[derive(Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePayload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Ephemeral create request: consumed by a single create call, never stored as-is.
#[derive(Debug, Clone)]
pub struct GalleryUploadRequest {
    pub title: String,
    pub category: Category,
    pub description: Option<String>,
    pub file: FilePayload,
}

impl GalleryUploadRequest {
    pub fn to_new_item(&self, image_url: String) -> NewGalleryItem {
        NewGalleryItem {
            title: self.title.clone(),
            category: self.category,
            description: self.description.clone(),
            image_url,
            user_id: None,
        }
    }
}
