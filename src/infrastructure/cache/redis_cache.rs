//! Redis-backed resolution cache.

use super::resolution_cache::{CacheError, CacheResult, CachedTarget, ResolutionCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

const KEY_PREFIX: &str = "link:";

/// Redis cache of resolution outcomes.
///
/// Entries expire after the configured TTL. Connection handling is left to
/// `ConnectionManager`, which reconnects on its own; command failures are
/// returned to the caller.
pub struct RedisCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and verifies the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid or Redis
    /// cannot be reached.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("invalid Redis URL: {}", e)))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        conn.ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("PING failed: {}", e)))?;

        info!(ttl_seconds, "Connected to Redis");

        Ok(Self { conn, ttl_seconds })
    }
}

fn cache_key(code: &str) -> String {
    format!("{KEY_PREFIX}{code}")
}

#[async_trait]
impl ResolutionCache for RedisCache {
    async fn lookup(&self, code: &str) -> CacheResult<Option<CachedTarget>> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(cache_key(code))
            .await
            .map_err(|e| CacheError::Command(e.to_string()))?;

        match raw {
            None => Ok(None),
            Some(raw) => CachedTarget::decode(&raw)
                .map(Some)
                .ok_or_else(|| CacheError::Corrupt {
                    code: code.to_string(),
                }),
        }
    }

    async fn store(&self, code: &str, target: &CachedTarget) -> CacheResult<()> {
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(cache_key(code), target.encode(), self.ttl_seconds)
            .await
            .map_err(|e| CacheError::Command(e.to_string()))?;

        debug!(code = %code, ttl_seconds = self.ttl_seconds, "Cached resolution");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
