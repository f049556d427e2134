mod disk;
mod handler;
mod validator;

pub use handler::serve_asset;
pub use validator::validate_path_component;
