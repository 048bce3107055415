//! HTTP error taxonomy and response mapping.
//!
//! Every failure path in the API resolves to one of these variants and is
//! written out as `{"error": "<message>"}` with the mapped status code.
//! Errors are handled locally per request; none propagate further.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use qrpress_core::QrError;
use serde::Serialize;
use thiserror::Error;

/// JSON envelope returned on every error path.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// GET generation request without a usable `content` parameter.
    #[error("Missing query parameter: content")]
    MissingContent,

    /// POST generation request with an empty body.
    #[error("Request body is empty")]
    EmptyBody,

    /// POST body exceeded the configured cap.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Body read failed for a reason unrelated to its size.
    #[error("Failed to read request body")]
    BodyRead,

    /// `size` parameter failed to parse or fell outside the bounds.
    #[error("Invalid size parameter. Must be between {min} and {max}")]
    InvalidSize {
        /// Smallest accepted pixel size.
        min: u32,
        /// Largest accepted pixel size.
        max: u32,
    },

    /// Request used an HTTP method the route does not support.
    #[error("Method not allowed. Use {allowed}.")]
    MethodNotAllowed {
        /// Methods the route accepts.
        allowed: &'static str,
    },

    /// No route matched the request path.
    #[error("Not found")]
    NotFound,

    /// The encoder failed; the underlying encoder message is surfaced to
    /// the client.
    #[error(transparent)]
    Encode(#[from] QrError),
}

impl ApiError {
    /// HTTP status code for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingContent | Self::EmptyBody | Self::InvalidSize { .. } => {
                StatusCode::BAD_REQUEST
            },
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyRead | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}
