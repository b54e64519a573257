//! Caching of resolution outcomes for fast redirects.
//!
//! - [`RedisCache`] - Redis-backed cache
//! - [`NullCache`] - used when caching is disabled

mod null_cache;
mod redis_cache;
mod resolution_cache;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use resolution_cache::{CacheError, CacheResult, CachedTarget, ResolutionCache};

#[cfg(test)]
pub use resolution_cache::MockResolutionCache;
