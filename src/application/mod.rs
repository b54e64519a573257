//! Application layer services implementing business logic.
//!
//! Services consume the link store trait and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::allocator::CodeAllocator`] - Collision-safe short code allocation
//! - [`services::resolver::Resolver`] - Short code to redirect decision
//! - [`services::qr_service::QrCodeService`] - QR code image references

pub mod services;
