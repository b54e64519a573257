//! Repository trait for link record storage.

use crate::domain::entities::{LinkRecord, NewLink};
use async_trait::async_trait;

/// Errors reported by a link store backend.
///
/// Every variant is an infrastructure failure; a missing record is `Ok(None)`
/// and a taken code is [`CreateOutcome::AlreadyExists`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("link store unavailable: {0}")]
    Unavailable(String),

    #[error("link store operation failed: {0}")]
    Backend(String),
}

/// Result of an atomic insert-if-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(LinkRecord),
    AlreadyExists,
}

/// Repository interface for link records keyed by short code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Checks whether a record exists for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be queried.
    async fn exists(&self, code: &str) -> Result<bool, StoreError>;

    /// Reads the record stored under `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(LinkRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be queried.
    async fn get(&self, code: &str) -> Result<Option<LinkRecord>, StoreError>;

    /// Inserts a record unless one already exists under the same code.
    ///
    /// Must be atomic: two concurrent calls with the same code yield exactly
    /// one [`CreateOutcome::Created`]. Existing records are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write cannot be performed.
    async fn create(&self, new_link: NewLink) -> Result<CreateOutcome, StoreError>;
}
