mod bootstrap;

use gallery_api::AppState;
use gallery_client::{GalleryService, UploadPolicy};
use gallery_events::{AppEvent, EventBus};
use crate::bootstrap::{config, logging, router, server, storage};
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("GALLERY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    server::initialize_folders(&config, &events).await?;

    let backend = storage::initialize(&config, &events).await?;
    let service = GalleryService::new(backend)
        .with_policy(UploadPolicy::from(&config.upload))
        .with_timeout(config.client.request_timeout());

    let app_state = AppState::new(
        service,
        config.storage.assets.path.clone(),
        config.server.streaming_threshold_mb,
    );
    let app = router::build(&config, app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = bind_server(&addr).await?;

    events.emit(AppEvent::Ready {
        addr: addr.clone(),
        base_url: config.server.base_url.clone(),
    });

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown...");
}

async fn bind_server(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.split(':').last().unwrap_or("unknown");
            tracing::error!("❌ Port {} is already in use", port);
            tracing::error!("Another application is using this port");
            tracing::error!("Solutions:");
            tracing::error!("1. Stop the other application");
            tracing::error!("2. Change the port in config.toml");
            #[cfg(target_os = "windows")]
            tracing::error!("3. Find process: netstat -ano | findstr :{}", port);
            #[cfg(not(target_os = "windows"))]
            tracing::error!("3. Find process: lsof -i :{}", port);
        } else {
            tracing::error!("❌ Failed to bind server on {}: {}", addr, e);
        }
        anyhow::anyhow!("Failed to bind server: {}", e)
    })
}
