//! qrpress HTTP API.
//!
//! Exposes the generation, health, and service-descriptor endpoints and
//! owns request validation: every payload and size parameter is checked
//! against configured bounds before the single encode call is made.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::{Config, LogFormat, QrLimits};
pub use error::{ApiError, ErrorResponse};
pub use server::{create_router, start_server};

use qrpress_core::QrService;

/// Shared state handed to every request handler.
///
/// Holds only immutable configuration and the stateless encoder, so it is
/// safe for unlimited concurrent use without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Stateless QR encoder.
    pub qr: QrService,
    /// Request validation bounds.
    pub limits: QrLimits,
}
