//! Utility functions for code generation and URL handling.
//!
//! - [`code_generator`] - Candidate short code generation
//! - [`url_scheme`] - Destination URL and code shape predicates
//! - [`short_url`] - Public short URL composition

pub mod code_generator;
pub mod short_url;
pub mod url_scheme;
