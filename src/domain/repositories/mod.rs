//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link record existence checks, reads and atomic creation

pub mod link_repository;

pub use link_repository::{CreateOutcome, LinkRepository, StoreError};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
