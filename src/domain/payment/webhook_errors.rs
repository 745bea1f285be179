//! Webhook error types.
//!
//! Every verification failure maps to a client error: the provider must
//! not retry a payload we will never accept, and an unverified payload
//! must never reach storage.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while verifying and decoding a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature header is absent from the request.
    #[error("Missing signature header")]
    MissingSignatureHeader,

    /// No webhook signing secret is configured; verification cannot run.
    #[error("Webhook signing secret not configured")]
    NotConfigured,

    /// Signature did not match the payload.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signed timestamp is in the future beyond clock-skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Signature header or JSON payload could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl WebhookError {
    /// HTTP status for the rejection response.
    ///
    /// All verification failures are client errors; a 5xx would make the
    /// provider retry a delivery that can never verify.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::MissingSignatureHeader
            | WebhookError::NotConfigured
            | WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_) => StatusCode::BAD_REQUEST,
        }
    }
}
