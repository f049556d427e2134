use crate::assets::AssetStore;
use crate::backend::StorageBackend;
use crate::{
    DataUriAssetStore, JsonFileStore, LocalAssetStore, MemoryStore, RecordStore, RemoteBackend,
    StorageError, StoreBackend,
};
use gallery_config::{AssetBackend, RecordBackend, StorageSettings};
use std::sync::Arc;

/// Builds the one storage backend the configuration selects
pub async fn from_config(settings: &StorageSettings) -> Result<Arc<dyn StorageBackend>, StorageError> {
    if settings.backend == RecordBackend::Remote {
        let backend = RemoteBackend::new(&settings.remote.base_url)?;
        tracing::info!("Using remote storage backend at {}", settings.remote.base_url);
        return Ok(Arc::new(backend));
    }

    let records: Arc<dyn RecordStore> = match settings.backend {
        RecordBackend::Json => Arc::new(JsonFileStore::new(&settings.data_path)),
        _ => Arc::new(MemoryStore::new()),
    };

    let assets = asset_store(settings).await?;
    let backend = StoreBackend::new(records, assets);
    tracing::info!("Using storage backend: {}", backend.name());

    Ok(Arc::new(backend))
}

async fn asset_store(settings: &StorageSettings) -> Result<Arc<dyn AssetStore>, StorageError> {
    match settings.assets.backend {
        AssetBackend::Local => Ok(Arc::new(LocalAssetStore::new(
            &settings.assets.path,
            settings.assets.public_url.clone(),
        ))),
        AssetBackend::DataUri => Ok(Arc::new(DataUriAssetStore::new())),
        AssetBackend::S3 => s3_store(settings).await,
    }
}

#[cfg(feature = "s3")]
async fn s3_store(settings: &StorageSettings) -> Result<Arc<dyn AssetStore>, StorageError> {
    if !settings.s3.enabled {
        return Err(StorageError::ConfigError(
            "assets.backend = \"s3\" requires [storage.s3] enabled = true".to_string(),
        ));
    }
    Ok(Arc::new(crate::S3AssetStore::new(&settings.s3).await?))
}

#[cfg(not(feature = "s3"))]
async fn s3_store(_settings: &StorageSettings) -> Result<Arc<dyn AssetStore>, StorageError> {
    Err(StorageError::ConfigError(
        "S3 asset storage requested but the server was built without the 's3' feature".to_string(),
    ))
}
