//! HTTP request handlers for the qrpress API.
//!
//! All handlers follow the same pattern: validate input against the
//! configured bounds, perform at most one encode call, and map every
//! failure to a JSON error response with the appropriate status code.
//!
//! # Handler Organization
//!
//! - `generate` - QR generation endpoints (GET query / POST body)
//! - `health` - liveness probe
//! - `info` - service descriptor at the root path

pub mod generate;
pub mod health;
pub mod info;

pub use generate::{generate_get, generate_post};
pub use health::health_check;
pub use info::service_info;
