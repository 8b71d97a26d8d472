use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CanvasBackend;
use crate::error::{Error, Result};

/// In-memory canvas storage (for development and tests)
///
/// Mimics the Redis semantics the store relies on and can be told to fail, so
/// storage error paths can be exercised without a server.
#[derive(Default)]
pub struct MemoryBackend {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
    unavailable: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend already holding `blob` under `key`
    #[must_use]
    pub fn with_blob(key: impl Into<String>, blob: Vec<u8>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.into(), blob);
        Self {
            blobs: RwLock::new(blobs),
            ..Self::default()
        }
    }

    /// Make every field write fail until turned off
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every operation, including ping, fail until turned off
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Copy of the stored blob, bypassing failure injection
    pub async fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().await.get(key).cloned()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Storage("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CanvasBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    async fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_available()?;
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn set_u32(&self, key: &str, bit_offset: u64, value: u32) -> Result<()> {
        self.check_available()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage("write rejected".to_string()));
        }
        if bit_offset % 8 != 0 {
            return Err(Error::Storage(format!(
                "unaligned bit offset {bit_offset}"
            )));
        }

        let mut blobs = self.blobs.write().await;
        let blob = blobs
            .get_mut(key)
            .ok_or_else(|| Error::Storage(format!("no such key: {key}")))?;

        let start = usize::try_from(bit_offset / 8)
            .map_err(|_| Error::Storage(format!("bit offset {bit_offset} out of range")))?;
        let field = blob
            .get_mut(start..start + 4)
            .ok_or_else(|| Error::Storage(format!("bit offset {bit_offset} out of range")))?;
        field.copy_from_slice(&value.to_be_bytes());

        Ok(())
    }

    async fn set_blob(&self, key: &str, blob: &[u8]) -> Result<()> {
        self.check_available()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage("write rejected".to_string()));
        }

        self.blobs.write().await.insert(key.to_string(), blob.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_set_u32_is_big_endian() {
        let backend = MemoryBackend::with_blob("k", vec![0; 8]);
        assert_ok!(backend.set_u32("k", 32, 0x11223344).await);
        assert_eq!(
            backend.blob("k").await.unwrap(),
            vec![0, 0, 0, 0, 0x11, 0x22, 0x33, 0x44]
        );
    }

    #[tokio::test]
    async fn test_set_u32_bounds_and_missing_key() {
        let backend = MemoryBackend::with_blob("k", vec![0; 8]);
        assert_err!(backend.set_u32("k", 64, 1).await);
        assert_err!(backend.set_u32("other", 0, 1).await);
        assert_eq!(backend.blob("k").await.unwrap(), vec![0; 8]);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let backend = MemoryBackend::with_blob("k", vec![0; 4]);

        backend.set_fail_writes(true);
        assert_ok!(backend.ping().await);
        assert_err!(backend.set_u32("k", 0, 1).await);

        backend.set_fail_writes(false);
        backend.set_unavailable(true);
        assert_err!(backend.ping().await);
        assert_err!(backend.get_blob("k").await);

        backend.set_unavailable(false);
        assert_ok!(backend.set_u32("k", 0, 1).await);
    }
}
