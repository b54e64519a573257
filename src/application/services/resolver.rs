//! Short code resolution into redirect decisions.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, error, warn};

use crate::domain::RedirectDecision;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::{CachedTarget, ResolutionCache};
use crate::utils::url_scheme::{has_http_scheme, is_well_formed_code};

/// Resolves short codes against the link store.
///
/// Every outcome is decided on a single store read; reads are never retried.
/// `Found` and `Invalid` outcomes are written to the cache in the background.
/// Records are immutable, so cached entries never need invalidation. A cache
/// failure only costs the store read it would have saved.
pub struct Resolver {
    link_repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn ResolutionCache>,
}

impl Resolver {
    /// Creates a new resolver.
    pub fn new(link_repository: Arc<dyn LinkRepository>, cache: Arc<dyn ResolutionCache>) -> Self {
        Self {
            link_repository,
            cache,
        }
    }

    /// Decides where a request for `code` should go.
    ///
    /// # Request Flow
    ///
    /// 1. Codes that cannot have been issued resolve to `NotFound` without a lookup
    /// 2. Check cache; a cached valid URL is `Found`, a cached malformed record is `Invalid`
    /// 3. On cache miss or cache error, read the store
    /// 4. Classify the record: missing, malformed, or valid
    pub async fn resolve(&self, code: &str) -> RedirectDecision {
        let decision = self.decide(code).await;
        counter!("resolutions_total", "outcome" => decision.outcome()).increment(1);
        decision
    }

    async fn decide(&self, code: &str) -> RedirectDecision {
        if !is_well_formed_code(code) {
            debug!(code = %code, "Rejecting malformed short code");
            return RedirectDecision::NotFound;
        }

        match self.cache.lookup(code).await {
            Ok(Some(CachedTarget::Found(url))) if has_http_scheme(&url) => {
                debug!("Cache HIT for {}", code);
                return RedirectDecision::Found(url);
            }
            Ok(Some(CachedTarget::Invalid)) => {
                debug!("Cache HIT (malformed record) for {}", code);
                return RedirectDecision::Invalid;
            }
            Ok(_) => debug!("Cache MISS for {}", code),
            Err(e) => error!(code = %code, error = %e, "Cache lookup failed, reading link store"),
        }

        match self.link_repository.get(code).await {
            Ok(None) => {
                debug!(code = %code, "Short code not found");
                RedirectDecision::NotFound
            }
            Ok(Some(record)) if !has_http_scheme(&record.original_url) => {
                warn!(
                    code = %code,
                    original_url = %record.original_url,
                    "Stored link record is malformed"
                );
                self.cache_in_background(code, CachedTarget::Invalid);
                RedirectDecision::Invalid
            }
            Ok(Some(record)) => {
                self.cache_in_background(code, CachedTarget::Found(record.original_url.clone()));
                RedirectDecision::Found(record.original_url)
            }
            Err(e) => {
                error!(code = %code, error = %e, "Link store lookup failed");
                RedirectDecision::StoreError(e.to_string())
            }
        }
    }

    /// Asynchronously update cache (fire-and-forget).
    fn cache_in_background(&self, code: &str, target: CachedTarget) {
        let cache = self.cache.clone();
        let code = code.to_string();
        tokio::spawn(async move {
            if let Err(e) = cache.store(&code, &target).await {
                error!(code = %code, error = %e, "Failed to cache resolution");
            }
        });
    }
}
