//! No-op cache used when Redis is not configured.

use super::resolution_cache::{CacheResult, CachedTarget, ResolutionCache};
use async_trait::async_trait;

/// Cache that never holds anything; every lookup goes to the link store.
#[derive(Debug, Default)]
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResolutionCache for NullCache {
    async fn lookup(&self, _code: &str) -> CacheResult<Option<CachedTarget>> {
        Ok(None)
    }

    async fn store(&self, _code: &str, _target: &CachedTarget) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
