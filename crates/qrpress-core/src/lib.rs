//! Core QR generation domain for the qrpress service.
//!
//! Wraps matrix construction and PNG serialization behind a single
//! stateless service type. The HTTP crate depends on this for the one
//! encode call it makes per request.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod qr;

pub use error::{QrError, Result};
pub use qr::QrService;
