mod assets;
mod gallery;
mod models;
mod state;
mod upload;
pub mod files;


pub use models::AppState;
pub use assets::{remove_asset, upload_asset};
pub use gallery::{count_items, create_item, create_items_bulk, delete_item, get_item, list_items, update_item};
pub use upload::upload_images;
pub use files::serve_asset;

use axum::{
    routing::{get, post},
    Router,
};

/// Gallery routes without middleware; the server adds its layers on top
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/gallery", get(list_items).post(create_item))
        .route("/api/gallery/counts", get(count_items))
        .route("/api/gallery/bulk", post(create_items_bulk))
        .route("/api/gallery/upload", post(upload_images))
        .route(
            "/api/gallery/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/api/assets", post(upload_asset).delete(remove_asset))
        .route("/assets/*key", get(serve_asset))
}
