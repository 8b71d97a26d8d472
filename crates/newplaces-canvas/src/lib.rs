//! newplaces Canvas - Shared Pixel Grid
//!
//! This crate owns the authoritative pixel state of the canvas:
//! - Geometry: canvas dimensions and the cell → offset convention
//! - Palette: the fixed set of permitted colors
//! - Pixel: the committed-write value object
//! - Backend: the durable-store port, with Redis and in-memory adapters
//! - Store: validation, durable commit, and the in-memory mirror
//! - Error: error types for canvas operations
//!
//! ## Layout
//!
//! The canvas is one flat blob of `width * height * 4` bytes. Each cell is a
//! big-endian RGBA `u32` at cell index `y * width + x` (row-major).
//!
//! ## Usage
//!
//! ```ignore
//! use newplaces_canvas::{CanvasConfig, CanvasStore, RedisBackend};
//! use std::sync::Arc;
//!
//! let backend = Arc::new(RedisBackend::new("redis://127.0.0.1:6379")?);
//! let store = CanvasStore::initialize(backend, &CanvasConfig::default()).await?;
//!
//! let pixel = store.set_pixel(10, 20, 0xE50000FF).await?;
//! let bytes = store.snapshot().await;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod pixel;
pub mod store;

pub use backend::{CanvasBackend, MemoryBackend, RedisBackend};
pub use config::CanvasConfig;
pub use error::{Error, IntegrityError, Result};
pub use geometry::CanvasGeometry;
pub use palette::{Palette, DEFAULT_PALETTE};
pub use pixel::Pixel;
pub use store::{provision, CanvasStore};
