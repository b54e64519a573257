//! Domain layer containing the link model and store contract.
//!
//! This module is independent of infrastructure and presentation concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Link record data structures
//! - [`repositories`] - Link store trait and its error/outcome types
//! - [`redirect`] - Redirect decision produced by the resolver
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - The store trait is implemented by the infrastructure layer and injected into services
//! - Business logic lives in [`crate::application::services`]

pub mod entities;
pub mod redirect;
pub mod repositories;

pub use redirect::RedirectDecision;
