//! Error types for QR generation.

use thiserror::Error;

/// Result type alias using [`QrError`].
pub type Result<T> = std::result::Result<T, QrError>;

/// Errors produced while turning a payload into a PNG image.
#[derive(Debug, Error)]
pub enum QrError {
    /// The payload was empty.
    #[error("data cannot be empty")]
    EmptyData,

    /// The payload could not be encoded as a QR matrix.
    #[error("failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// PNG serialization of the rendered matrix failed.
    #[error("failed to render PNG: {0}")]
    Png(#[from] image::ImageError),
}
