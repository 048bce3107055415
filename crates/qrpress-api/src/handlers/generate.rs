//! QR generation endpoints.
//!
//! Accepts the payload either as a `content` query parameter (GET) or as
//! the raw request body (POST), validates the requested pixel size against
//! the configured bounds, and responds with the encoded PNG.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, instrument, warn};

use crate::{config::QrLimits, error::ApiError, AppState};

/// Query parameters accepted by the generation endpoints.
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    /// Payload text; required for GET, ignored for POST.
    pub content: Option<String>,
    /// Requested pixel size; validated against configured bounds.
    pub size: Option<String>,
}

/// Generates a QR code from the `content` query parameter.
///
/// The query layer percent-decodes once already; a second decode pass
/// covers double-encoded payloads, keeping the raw string when that pass
/// fails.
#[instrument(name = "generate_qr_get", skip(state, params))]
pub async fn generate_get(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
) -> Result<Response, ApiError> {
    let content = params.content.as_deref().unwrap_or_default();
    if content.is_empty() {
        return Err(ApiError::MissingContent);
    }

    let payload = urlencoding::decode(content)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| content.to_string());

    let size = parse_size(params.size.as_deref(), &state.limits)?;
    encode_response(&state, payload.as_bytes(), size)
}

/// Generates a QR code from the raw request body.
///
/// The body is read through the router's size-limit layer; over-limit
/// requests are rejected without buffering the full payload.
#[instrument(name = "generate_qr_post", skip(state, params, body))]
pub async fn generate_post(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(limit = state.limits.max_body_size, "request body exceeds size limit");
            return Err(ApiError::PayloadTooLarge);
        },
        Err(rejection) => {
            error!(error = %rejection.body_text(), "failed to read request body");
            return Err(ApiError::BodyRead);
        },
    };

    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let size = parse_size(params.size.as_deref(), &state.limits)?;
    encode_response(&state, &body, size)
}

/// Resolves the `size` parameter against the configured bounds.
///
/// Absent or empty means the configured default, which is not range
/// checked; an explicit value must parse and land within the bounds.
fn parse_size(raw: Option<&str>, limits: &QrLimits) -> Result<u32, ApiError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(limits.default_qr_size);
    };

    match raw.parse::<u32>() {
        Ok(size) if size >= limits.min_qr_size && size <= limits.max_qr_size => Ok(size),
        _ => Err(ApiError::InvalidSize { min: limits.min_qr_size, max: limits.max_qr_size }),
    }
}

/// Invokes the encoder and wraps the PNG bytes in a response.
fn encode_response(state: &AppState, payload: &[u8], size: u32) -> Result<Response, ApiError> {
    let png = state.qr.generate(payload, size).map_err(|e| {
        error!(error = %e, size, "failed to generate QR code");
        ApiError::Encode(e)
    })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: QrLimits =
        QrLimits { max_body_size: 1024 * 1024, min_qr_size: 64, max_qr_size: 512, default_qr_size: 256 };

    #[test]
    fn absent_size_uses_default() {
        assert_eq!(parse_size(None, &LIMITS).unwrap(), 256);
        assert_eq!(parse_size(Some(""), &LIMITS).unwrap(), 256);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(parse_size(Some("64"), &LIMITS).unwrap(), 64);
        assert_eq!(parse_size(Some("512"), &LIMITS).unwrap(), 512);
    }

    #[test]
    fn out_of_range_sizes_are_rejected() {
        assert!(matches!(
            parse_size(Some("63"), &LIMITS),
            Err(ApiError::InvalidSize { min: 64, max: 512 })
        ));
        assert!(matches!(
            parse_size(Some("513"), &LIMITS),
            Err(ApiError::InvalidSize { min: 64, max: 512 })
        ));
        assert!(matches!(
            parse_size(Some("9999"), &LIMITS),
            Err(ApiError::InvalidSize { min: 64, max: 512 })
        ));
    }

    #[test]
    fn non_numeric_sizes_are_rejected() {
        for raw in ["abc", "12.5", "-100", "128px"] {
            assert!(
                matches!(parse_size(Some(raw), &LIMITS), Err(ApiError::InvalidSize { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_size_bypasses_range_check() {
        // A default outside the bounds is honored when no size is given.
        let limits =
            QrLimits { max_body_size: 1024, min_qr_size: 64, max_qr_size: 512, default_qr_size: 600 };

        assert_eq!(parse_size(None, &limits).unwrap(), 600);
    }
}
