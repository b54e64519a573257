//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::QrRequest;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::compose_short_url;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "k3x9qa",
///   "short_url": "https://linkmagic.meetsid.dev/k3x9qa",
///   "original_url": "https://example.com/some/long/path",
///   "qr_code_url": "https://api.qrserver.com/v1/create-qr-code/?data=..."
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL is empty, too long, or not HTTP(S)
/// - 503 `allocation_exhausted` if no unique code was found
/// - 503 `store_unavailable` if the link store could not be reached
///
/// A QR failure is not an error: the link is already stored, so the response
/// is still `201` with `qr_code_url` set to `null`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let record = state.allocator.allocate(&payload.url).await?;

    let short_url = compose_short_url(&state.base_url, &record.code);

    // The record is already committed; a QR failure must not turn it into an error.
    let qr_code_url = match state.qr_service.generate(&QrRequest::new(short_url.clone())) {
        Ok(qr) => Some(qr.image_url),
        Err(e) => {
            tracing::warn!(code = %record.code, error = %e, "QR code unavailable for short link");
            None
        }
    };

    tracing::info!(code = %record.code, "Short link created");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            code: record.code,
            short_url,
            original_url: record.original_url,
            qr_code_url,
        }),
    ))
}
