//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Code looked up to test the link store. The `-` keeps it outside the
/// allocator's alphabet, so no record can ever exist under it.
const HEALTH_CHECK_CODE: &str = "health-check";

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Link store reachable
/// - **503 Service Unavailable**: Link store unreachable
///
/// The cache is reported but optional: a Redis outage only slows redirects
/// down, so it does not degrade the overall status.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "link_store": { "status": "ok", "message": "Reachable" },
///     "cache": { "status": "ok", "message": "Reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_link_store(&state).await;
    let cache_check = check_cache(&state).await;

    let healthy = store_check.is_ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            link_store: store_check,
            cache: cache_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks link store connectivity with an existence lookup.
async fn check_link_store(state: &AppState) -> CheckStatus {
    match state.links.exists(HEALTH_CHECK_CODE).await {
        Ok(_) => CheckStatus::ok("Reachable"),
        Err(e) => CheckStatus::error(format!("Link store error: {}", e)),
    }
}

/// Checks cache connectivity (Redis PING; always ok when caching is off).
async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Reachable")
    } else {
        CheckStatus::error("Cache connection failed")
    }
}
