//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **307** to the original URL when the code resolves
/// - **307** to the configured home URL when the code is unknown or its
///   record is malformed
/// - **503** when the link store could not be read; a store outage never
///   looks like a missing link
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let decision = state.resolver.resolve(&code).await;

    match decision.target(&state.home_url) {
        Some(target) => Redirect::temporary(target).into_response(),
        None => AppError::store_unavailable(
            "Link store unavailable, try again later",
            json!({ "code": code }),
        )
        .into_response(),
    }
}

