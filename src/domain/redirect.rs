//! Outcome of resolving a short code.

use std::fmt;

/// Redirect decision produced by [`crate::application::services::Resolver`].
///
/// `NotFound` and `Invalid` lead to the same redirect (the configured home
/// location) but are kept apart so corrupted records show up in logs.
/// `StoreError` must never be turned into a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    Found(String),
    NotFound,
    Invalid,
    StoreError(String),
}

impl RedirectDecision {
    /// Short label used for metrics and structured logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound => "not_found",
            Self::Invalid => "invalid",
            Self::StoreError(_) => "store_error",
        }
    }

    /// Returns the redirect target, falling back to `home` for missing or
    /// malformed records. Returns `None` on store failure.
    pub fn target<'a>(&'a self, home: &'a str) -> Option<&'a str> {
        match self {
            Self::Found(url) => Some(url),
            Self::NotFound | Self::Invalid => Some(home),
            Self::StoreError(_) => None,
        }
    }
}

impl fmt::Display for RedirectDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(url) => write!(f, "found: {}", url),
            Self::NotFound => write!(f, "not found"),
            Self::Invalid => write!(f, "invalid record"),
            Self::StoreError(reason) => write!(f, "store error: {}", reason),
        }
    }
}
