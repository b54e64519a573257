//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request bodies
//! are checked with validator.

pub mod health;
pub mod qr;
pub mod shorten;
