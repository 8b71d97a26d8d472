use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::CanvasBackend;
use crate::error::{Error, Result};

/// Redis-backed canvas storage (for production)
///
/// Cell writes use `BITFIELD <key> SET u32 <offset> <value>`, which Redis
/// applies atomically, so a cell is never half-written.
pub struct RedisBackend {
    client: redis::Client,
    /// Lazily established, shared by every request
    connection: OnceCell<MultiplexedConnection>,
}

impl RedisBackend {
    /// Create a new Redis backend
    ///
    /// # Errors
    ///
    /// Returns error if the Redis URL is invalid
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| Error::Storage(e.to_string()))?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
        })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        let connection = self
            .connection
            .get_or_try_init(|| async {
                let connection = self
                    .client
                    .get_multiplexed_async_connection()
                    .await
                    .map_err(|e| Error::Storage(format!("Redis connection failed: {}", e)))?;
                info!("Connected to Redis");
                Ok::<_, Error>(connection)
            })
            .await?;

        Ok(connection.clone())
    }
}

#[async_trait]
impl CanvasBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(())
    }

    async fn get_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.get_connection().await?;

        let blob: Option<Vec<u8>> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        debug!(key, bytes = blob.as_ref().map(Vec::len), "Canvas blob read from Redis");
        Ok(blob)
    }

    async fn set_u32(&self, key: &str, bit_offset: u64, value: u32) -> Result<()> {
        let mut conn = self.get_connection().await?;

        redis::cmd("BITFIELD")
            .arg(key)
            .arg("SET")
            .arg("u32")
            .arg(bit_offset)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(())
    }

    async fn set_blob(&self, key: &str, blob: &[u8]) -> Result<()> {
        let mut conn = self.get_connection().await?;

        redis::cmd("SET")
            .arg(key)
            .arg(blob)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        debug!(key, bytes = blob.len(), "Canvas blob written to Redis");
        Ok(())
    }
}

#[cfg(test)]
// Redis tests require a running Redis instance
// Run with: cargo test --features redis-tests
#[cfg(feature = "redis-tests")]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_redis_bitfield_roundtrip() {
        let backend = RedisBackend::new("redis://127.0.0.1:6379").unwrap();
        let key = "newplaces:test:bitfield";

        backend.ping().await.unwrap();
        backend.set_blob(key, &[0u8; 16]).await.unwrap();
        backend.set_u32(key, 32, 0xE50000FF).await.unwrap();

        let blob = backend.get_blob(key).await.unwrap().unwrap();
        assert_eq!(blob.len(), 16);
        assert_eq!(&blob[4..8], &[0xE5, 0x00, 0x00, 0xFF]);
        assert_eq!(&blob[0..4], &[0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_redis_missing_key() {
        let backend = RedisBackend::new("redis://127.0.0.1:6379").unwrap();
        let blob = backend.get_blob("newplaces:test:absent").await.unwrap();
        assert!(blob.is_none());
    }
}
