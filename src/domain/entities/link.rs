//! Link record entity representing a persisted short code mapping.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to its original URL.
///
/// Records are written once by the allocator and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a new LinkRecord instance.
    pub fn new(code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            original_url,
            created_at,
        }
    }
}

/// Input data for creating a new link record.
///
/// `created_at` is assigned by the allocator at write time.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    /// Creates a new link stamped with the current time.
    pub fn now(code: String, original_url: String) -> Self {
        Self {
            code,
            original_url,
            created_at: Utc::now(),
        }
    }

    /// Converts the input into the record it will be stored as.
    pub fn into_record(self) -> LinkRecord {
        LinkRecord::new(self.code, self.original_url, self.created_at)
    }
}
