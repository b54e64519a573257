//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! - [`LinkRecord`] - A stored short code mapping
//! - [`NewLink`] - Input for creating a record

pub mod link;

pub use link::{LinkRecord, NewLink};
