use gallery_events::{AppEvent, EventBus};
use gallery_config::Config;
use gallery_storage::StorageBackend;
use anyhow::Result;
use std::sync::Arc;

pub async fn initialize(config: &Config, events: &Arc<EventBus>) -> Result<Arc<dyn StorageBackend>> {
    let backend = gallery_storage::from_config(&config.storage).await.map_err(|e| {
        events.emit(AppEvent::Error {
            context: "Storage initialization failed".to_string(),
            error: e.to_string(),
        });
        anyhow::anyhow!("Failed to initialize storage: {}", e)
    })?;

    events.emit(AppEvent::StorageReady {
        backend: backend.name().to_string(),
    });

    Ok(backend)
}
