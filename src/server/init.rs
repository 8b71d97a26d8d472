//! Server initialization
//!
//! Wires the canvas store and the update broker into the HTTP layer and runs
//! until a shutdown signal arrives.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use newplaces_broker::Broker;
use newplaces_canvas::{provision, CanvasBackend, CanvasStore, MemoryBackend, RedisBackend};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use super::config::AppConfig;
use super::shutdown::wait_for_shutdown_signal;
use crate::service::PlaceService;

/// Canvas color used to seed the in-memory backend
const MEMORY_CANVAS_COLOR: u32 = 0xFFFFFFFF;

/// How long to wait for the broker loop after the server stops
const BROKER_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the durable backend for this run
async fn build_backend(config: &AppConfig, memory: bool) -> Result<Arc<dyn CanvasBackend>> {
    if memory {
        warn!("Using in-memory canvas; writes will not survive a restart");
        let backend = MemoryBackend::new();
        provision(&backend, &config.canvas, MEMORY_CANVAS_COLOR)
            .await
            .context("Failed to seed in-memory canvas")?;
        return Ok(Arc::new(backend));
    }

    let backend = RedisBackend::new(&config.redis.url).context("Invalid Redis URL")?;
    info!(url = %config.redis.url, "Using Redis canvas backend");
    Ok(Arc::new(backend))
}

/// Attach the built UI, if present
fn with_static_files(app: Router, static_dir: &Path) -> Router {
    if !static_dir.exists() {
        info!("No UI assets at {}, serving API only", static_dir.display());
        return app;
    }

    info!("Serving UI from {}", static_dir.display());
    let serve_dir = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(static_dir.join("index.html")));
    app.fallback_service(serve_dir)
}

/// Run the server until Ctrl+C / SIGTERM
pub async fn run(config: AppConfig, memory: bool) -> Result<()> {
    let backend = build_backend(&config, memory).await?;

    // A missing or mis-sized canvas is fatal: there is no safe partial state.
    let store = CanvasStore::initialize(backend, &config.canvas)
        .await
        .context("Failed to load canvas")?;

    let (broker, broker_handle) = Broker::new(config.broker);
    let broker_task = broker.spawn();

    let service = PlaceService::new(Arc::new(store), broker_handle.clone());
    let app = with_static_files(
        crate::api::router(service),
        Path::new(&config.server.static_dir),
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("HTTP server listening on http://{}", addr);

    // Open event streams end once the broker stops.
    let shutdown_broker = broker_handle.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            shutdown_broker.stop();
        })
        .await
        .context("HTTP server error")?;

    broker_handle.stop();
    match tokio::time::timeout(BROKER_STOP_TIMEOUT, broker_task).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Broker task error: {}", e),
        Err(_) => warn!("Broker shutdown timeout"),
    }

    info!("newplaces shutdown complete");
    Ok(())
}
