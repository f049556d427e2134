use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, base_url: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { backend: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },
    ConfigError { error: String },

    // Storage
    StorageFolderCreated { path: String },
    StorageReady { backend: String },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
