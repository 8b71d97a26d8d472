//! Durable-store port for the canvas blob.
//!
//! The store only needs four primitives from its backing service: a liveness
//! check, a whole-blob read, an atomic 32-bit field write at a bit offset, and
//! a whole-blob write used when provisioning a fresh canvas.

mod memory_backend;
mod redis_backend;

pub use memory_backend::MemoryBackend;
pub use redis_backend::RedisBackend;

use async_trait::async_trait;

use crate::error::Result;

/// Durable key-value store holding the canvas blob
#[async_trait]
pub trait CanvasBackend: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Verify the store is reachable
    async fn ping(&self) -> Result<()>;

    /// Read the whole blob under `key`, `None` if absent
    async fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically set the unsigned 32-bit big-endian field at `bit_offset`
    async fn set_u32(&self, key: &str, bit_offset: u64, value: u32) -> Result<()>;

    /// Replace the whole blob under `key`
    async fn set_blob(&self, key: &str, blob: &[u8]) -> Result<()>;
}
