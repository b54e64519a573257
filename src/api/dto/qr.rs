//! DTOs for QR code endpoint.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::QrRequest;

/// Query parameters for `GET /api/qr`.
///
/// `size` arrives as a query string and is parsed from its text form.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub data: String,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub size: Option<u32>,

    pub color: Option<String>,
    pub bgcolor: Option<String>,
}

impl From<QrQuery> for QrRequest {
    fn from(query: QrQuery) -> Self {
        QrRequest {
            data: query.data,
            size: query.size,
            foreground: query.color,
            background: query.bgcolor,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub image_url: String,
}
