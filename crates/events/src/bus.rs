use super::models::{AppEvent, EventBus};
use colored::Colorize;
use std::sync::Arc;

impl EventBus {
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                self.banner();
            }
            AppEvent::Ready { addr, base_url } => {
                self.print(format!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green()));
                self.print(format!("  {} {}", "Server".white(), addr.cyan()));
                self.print(format!("  {} {}", "URL   ".white(), base_url.blue()));
                self.print(format!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green()));
                tracing::info!("Listening on {}", addr);
            }
            AppEvent::Shutdown => {
                self.print(format!("\n{}", "Server shutting down".red()));
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                self.print(format!("  {} {}", "Loading config".dimmed(), path.cyan()));
            }
            AppEvent::ConfigLoaded { backend } => {
                self.print(format!("  {} storage backend {}", "✓".green(), backend.cyan()));
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() {
                    self.print(format!(
                        "  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    ));
                }
            }
            AppEvent::ConfigError { error } => {
                tracing::error!("Configuration error: {}", error);
            }

            // Storage
            AppEvent::StorageFolderCreated { path } => {
                tracing::debug!("Created storage folder {}", path);
            }
            AppEvent::StorageReady { backend } => {
                self.print(format!("  {} Storage ready ({})", "✓".green(), backend.cyan()));
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }

    fn banner(&self) {
        self.print(format!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()));
        self.print(format!("  {}", "Gallery - Image Gallery Server".white().bold()));
        self.print(format!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan()));
        self.print(format!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black()));
    }

    // Console output is suppressed in silent mode; tracing output is not.
    fn print(&self, line: String) {
        if !self.silent_mode {
            println!("{}", line);
        }
    }
}
