//! Handler for QR code endpoint.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::qr::{QrQuery, QrResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the image URL of a QR code encoding `data`.
///
/// # Endpoint
///
/// `GET /api/qr?data=...&size=300&color=000000&bgcolor=FFFFFF`
///
/// `size`, `color` and `bgcolor` are optional.
///
/// # Errors
///
/// Returns 400 Bad Request if data is empty or longer than 500 characters,
/// the size is outside 1..=1000, or a color is not 6 hex digits.
pub async fn qr_handler(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
) -> Result<Json<QrResponse>, AppError> {
    let qr = state.qr_service.generate(&query.into())?;

    Ok(Json(QrResponse {
        image_url: qr.image_url,
    }))
}
