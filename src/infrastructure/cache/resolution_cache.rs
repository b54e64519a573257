//! Cache of resolution outcomes keyed by short code.

use async_trait::async_trait;

use crate::utils::url_scheme::has_http_scheme;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),

    #[error("cache command failed: {0}")]
    Command(String),

    #[error("cache entry for '{code}' is unreadable")]
    Corrupt { code: String },
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A resolution outcome that may be cached.
///
/// Link records never change once written, so both a valid target and a
/// malformed record stay true for the life of the code. `NotFound` is never
/// cached: the code may be allocated later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedTarget {
    Found(String),
    Invalid,
}

const FOUND_PREFIX: &str = "found:";
const INVALID_MARKER: &str = "invalid";

impl CachedTarget {
    /// Serialized form stored in the cache backend.
    pub fn encode(&self) -> String {
        match self {
            Self::Found(url) => format!("{FOUND_PREFIX}{url}"),
            Self::Invalid => INVALID_MARKER.to_string(),
        }
    }

    /// Parses a stored value. A `found:` entry whose URL fails the scheme
    /// check is rejected, so a tampered entry can never become a redirect.
    pub fn decode(raw: &str) -> Option<Self> {
        if raw == INVALID_MARKER {
            return Some(Self::Invalid);
        }

        raw.strip_prefix(FOUND_PREFIX)
            .filter(|url| has_http_scheme(url))
            .map(|url| Self::Found(url.to_string()))
    }
}

/// Read-through cache in front of the link store.
///
/// Lookup failures are returned as errors so callers can log them and fall
/// back to the store; a miss is `Ok(None)`.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis with a TTL per entry
/// - [`crate::infrastructure::cache::NullCache`] - caching disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResolutionCache: Send + Sync {
    /// Returns the cached outcome for `code`, if any.
    async fn lookup(&self, code: &str) -> CacheResult<Option<CachedTarget>>;

    /// Records the outcome for `code`.
    async fn store(&self, code: &str, target: &CachedTarget) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
