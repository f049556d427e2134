mod assets;
mod backend;
mod composite;
mod data_uri;
mod errors;
mod factory;
mod json_store;
mod local;
mod memory_store;
mod records;
mod remote;

#[cfg(feature = "s3")]
mod s3;

pub use assets::{extension_for_mime, generate_key, validate_key, AssetStore};
pub use backend::StorageBackend;
pub use composite::StoreBackend;
pub use data_uri::DataUriAssetStore;
pub use errors::*;
pub use factory::from_config;
pub use json_store::JsonFileStore;
pub use local::LocalAssetStore;
pub use memory_store::MemoryStore;
pub use records::RecordStore;
pub use remote::{AssetUrl, RemoteBackend};

#[cfg(feature = "s3")]
pub use s3::S3AssetStore;
