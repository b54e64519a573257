//! Business logic services for the application layer.

pub mod allocator;
pub mod qr_service;
pub mod resolver;

pub use allocator::{AllocateError, AllocatorSettings, CodeAllocator};
pub use qr_service::{QrCode, QrCodeService, QrError, QrRequest};
pub use resolver::Resolver;
