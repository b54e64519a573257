//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL. Scheme rules are enforced by the allocator.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1 to 2048 characters"))]
    pub url: String,
}

/// A newly created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub qr_code_url: Option<String>,
}
