//! Domain types shared by every gallery crate.

mod category;
mod item;
mod upload;

pub use category::{Category, CategoryFilter, CategoryParseError, ALL_CATEGORIES_LABEL};
pub use item::{GalleryItem, GalleryItemPatch, NewGalleryItem};
pub use upload::{FilePayload, GalleryUploadRequest};
