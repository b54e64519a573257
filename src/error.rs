//! HTTP error type and its JSON rendering.
//!
//! Every error response has the shape
//! `{"error": {"code": "...", "message": "...", "details": {...}}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::{AllocateError, QrError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Exhausted { message: String, details: Value },
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::Exhausted {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Exhausted { .. } | AppError::StoreUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Exhausted { message, details } => ("allocation_exhausted", message, details),
            AppError::StoreUnavailable { message, details } => {
                ("store_unavailable", message, details)
            }
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl From<AllocateError> for AppError {
    fn from(err: AllocateError) -> Self {
        match err {
            AllocateError::InvalidInput(reason) => {
                AppError::bad_request("Invalid URL", json!({ "reason": reason }))
            }
            AllocateError::AllocationExhausted { attempts } => AppError::exhausted(
                "Could not allocate a unique short code, try again",
                json!({ "attempts": attempts }),
            ),
            AllocateError::StoreUnavailable(reason) => {
                AppError::store_unavailable("Link store unavailable", json!({ "reason": reason }))
            }
        }
    }
}

impl From<QrError> for AppError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::InvalidServiceUrl(_) => {
                AppError::internal("QR service misconfigured", json!({}))
            }
            other => AppError::bad_request(other.to_string(), json!({})),
        }
    }
}
