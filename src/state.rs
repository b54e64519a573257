//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{CodeAllocator, QrCodeService, Resolver};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::ResolutionCache;

/// Application state shared across handlers.
///
/// Cloning is cheap: every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<CodeAllocator>,
    pub resolver: Arc<Resolver>,
    pub qr_service: Arc<QrCodeService>,
    /// Used directly only by the health check.
    pub links: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn ResolutionCache>,
    /// Public base of short URLs.
    pub base_url: String,
    /// Redirect target for codes that do not resolve.
    pub home_url: String,
}

impl AppState {
    /// Wires services around a link store and cache.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn ResolutionCache>,
        allocator: CodeAllocator,
        qr_service: QrCodeService,
        base_url: impl Into<String>,
        home_url: impl Into<String>,
    ) -> Self {
        let resolver = Resolver::new(links.clone(), cache.clone());

        Self {
            allocator: Arc::new(allocator),
            resolver: Arc::new(resolver),
            qr_service: Arc::new(qr_service),
            links,
            cache,
            base_url: base_url.into(),
            home_url: home_url.into(),
        }
    }
}
