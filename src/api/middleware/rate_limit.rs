//! Per-client rate limiting for the API routes.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Token replenishment interval in milliseconds (5 requests per second).
const REPLENISH_INTERVAL_MS: u64 = 200;

/// Requests a client may send in a burst before being throttled.
const BURST_SIZE: u32 = 50;

/// Creates the rate limiter applied to `/api`.
///
/// Each client IP (taken from the socket peer address) gets a token bucket of
/// [`BURST_SIZE`] tokens, refilled every [`REPLENISH_INTERVAL_MS`]. Requests
/// over the limit receive `429 Too Many Requests`. Redirects are not limited.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(REPLENISH_INTERVAL_MS)
        .burst_size(BURST_SIZE)
        .finish()
        .expect("rate limit constants are non-zero");

    GovernorLayer::new(Arc::new(governor_conf))
}
