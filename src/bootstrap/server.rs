use gallery_events::{AppEvent, EventBus};
use gallery_config::{AssetBackend, Config, RecordBackend};
use gallery_filesystem::FileSystem;
use anyhow::Result;
use std::sync::Arc;

/// Creates the folders the local stores write into
pub async fn initialize_folders(config: &Config, events: &Arc<EventBus>) -> Result<()> {
    let storage = &config.storage;
    if storage.backend != RecordBackend::Json && storage.assets.backend != AssetBackend::Local {
        return Ok(());
    }

    let created = FileSystem::ensure_storage_structure(&storage.data_path, &storage.assets.path).await?;
    for path in created {
        events.emit(AppEvent::StorageFolderCreated {
            path: path.display().to_string(),
        });
    }

    Ok(())
}
