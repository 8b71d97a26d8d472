//! `newplaces reset` - provision the durable canvas

use anyhow::{Context, Result};
use newplaces_canvas::{provision, RedisBackend};
use tracing::info;

use crate::server::config::AppConfig;

/// Overwrite the canvas blob in Redis with a solid palette color
pub async fn run(config: &AppConfig, color: u32) -> Result<()> {
    let backend = RedisBackend::new(&config.redis.url).context("Invalid Redis URL")?;

    info!(
        key = %config.canvas.key,
        width = config.canvas.width,
        height = config.canvas.height,
        "Resetting canvas"
    );

    provision(&backend, &config.canvas, color)
        .await
        .context("Failed to reset canvas")?;

    println!(
        "Canvas '{}' reset to {:#010X} ({}x{})",
        config.canvas.key, color, config.canvas.width, config.canvas.height
    );
    Ok(())
}
