//! API route configuration.

use crate::api::handlers::{qr_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link for a URL
/// - `GET  /qr`      - Build a QR code image URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/qr", get(qr_handler))
}
