//! QR code image references from the external QR service.
//!
//! No image is rendered here: the service builds the request URL for the
//! external API, which clients embed directly as an image source.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

use crate::utils::url_scheme::has_http_scheme;

/// Default external QR code API endpoint.
pub const DEFAULT_QR_API_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Maximum number of characters encoded in one QR code.
pub const MAX_QR_DATA_LENGTH: usize = 500;

/// Maximum image edge length in pixels.
pub const MAX_QR_SIZE: u32 = 1000;

/// Image edge length used when none is requested.
pub const DEFAULT_QR_SIZE: u32 = 150;

const DEFAULT_FOREGROUND: &str = "000000";
const DEFAULT_BACKGROUND: &str = "FFFFFF";

/// Compiled regex for hex colors accepted by the QR API.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{6}$").expect("static regex"));

/// Errors returned when a QR request violates the service limits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    #[error("QR code data must not be empty")]
    EmptyData,

    #[error(
        "QR code data exceeds maximum length of {max} characters (got {length})",
        max = MAX_QR_DATA_LENGTH
    )]
    DataTooLong { length: usize },

    #[error("QR code size must be between 1 and {max} pixels (got {0})", max = MAX_QR_SIZE)]
    InvalidSize(u32),

    #[error("Invalid color '{0}', expected 6 hex digits")]
    InvalidColor(String),

    #[error("Invalid QR service URL: {0}")]
    InvalidServiceUrl(String),
}

/// Parameters for one QR code image.
#[derive(Debug, Clone, Default)]
pub struct QrRequest {
    pub data: String,
    pub size: Option<u32>,
    pub foreground: Option<String>,
    pub background: Option<String>,
}

impl QrRequest {
    /// Creates a request with default size and colors.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }
}

/// Reference to a QR code image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    pub image_url: String,
}

/// Builds image URLs for the external QR code API.
#[derive(Debug, Clone)]
pub struct QrCodeService {
    api_url: Url,
}

impl QrCodeService {
    /// Creates a service targeting `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::InvalidServiceUrl`] if `api_url` cannot be parsed.
    pub fn new(api_url: &str) -> Result<Self, QrError> {
        let api_url = Url::parse(api_url).map_err(|e| QrError::InvalidServiceUrl(e.to_string()))?;
        Ok(Self { api_url })
    }

    /// Validates `request` and returns the image URL for it.
    ///
    /// Data that does not look like an HTTP(S) URL is still encoded; it is
    /// only logged.
    ///
    /// # Errors
    ///
    /// - [`QrError::EmptyData`] / [`QrError::DataTooLong`] for bad data
    /// - [`QrError::InvalidSize`] if the size is 0 or above [`MAX_QR_SIZE`]
    /// - [`QrError::InvalidColor`] for colors other than 6 hex digits
    pub fn generate(&self, request: &QrRequest) -> Result<QrCode, QrError> {
        if request.data.is_empty() {
            return Err(QrError::EmptyData);
        }

        let length = request.data.chars().count();
        if length > MAX_QR_DATA_LENGTH {
            return Err(QrError::DataTooLong { length });
        }

        let size = request.size.unwrap_or(DEFAULT_QR_SIZE);
        if size == 0 || size > MAX_QR_SIZE {
            return Err(QrError::InvalidSize(size));
        }

        let foreground = validate_color(request.foreground.as_deref(), DEFAULT_FOREGROUND)?;
        let background = validate_color(request.background.as_deref(), DEFAULT_BACKGROUND)?;

        if !has_http_scheme(&request.data) {
            warn!("QR code data does not appear to be a standard URL");
        }

        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("data", &request.data)
            .append_pair("size", &format!("{size}x{size}"))
            .append_pair("color", foreground)
            .append_pair("bgcolor", background)
            .append_pair("format", "png")
            .append_pair("qzone", "1");

        Ok(QrCode {
            image_url: url.into(),
        })
    }
}

impl Default for QrCodeService {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_QR_API_URL).expect("default QR API URL is valid"),
        }
    }
}

fn validate_color<'a>(color: Option<&'a str>, default: &'a str) -> Result<&'a str, QrError> {
    match color {
        None => Ok(default),
        Some(c) if HEX_COLOR_REGEX.is_match(c) => Ok(c),
        Some(c) => Err(QrError::InvalidColor(c.to_string())),
    }
}
