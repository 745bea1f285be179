//! Stripe webhook signature verification.
//!
//! HMAC-SHA256 over the byte-exact request body with timestamp
//! validation against replay. Verification strictly precedes any parse
//! of the payload into event types, and any failure rejects the
//! delivery before storage is touched.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::stripe_event::StripeEvent;
use super::webhook_errors::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed age for a signed delivery (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Clock-skew tolerance for timestamps from the future (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed `Stripe-Signature` header.
///
/// Format: `t=<timestamp>,v1=<hex>[,v1=<hex>...]`. Stripe sends more
/// than one `v1` entry while a signing secret is being rolled; a match
/// against any of them verifies the delivery. Unknown keys are ignored
/// for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub candidates: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parse the raw header value.
    ///
    /// # Errors
    ///
    /// `WebhookError::ParseError` when the timestamp or every `v1`
    /// signature is missing or malformed.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut candidates: Vec<Vec<u8>> = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                return Err(WebhookError::ParseError(
                    "invalid signature header format".to_string(),
                ));
            };
            match key.trim() {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    let sig = hex::decode(value).map_err(|_| {
                        WebhookError::ParseError("invalid v1 signature hex".to_string())
                    })?;
                    candidates.push(sig);
                }
                // v0 is the legacy scheme; anything else is future-proofing
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        if candidates.is_empty() {
            return Err(WebhookError::ParseError(
                "missing v1 signature".to_string(),
            ));
        }

        Ok(Self {
            timestamp,
            candidates,
        })
    }
}

/// Verifier for inbound Stripe webhook deliveries.
pub struct StripeWebhookVerifier {
    secret: String,
}

impl StripeWebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify a delivery and decode it into an event.
    ///
    /// Steps, in order: parse the signature header, check the timestamp
    /// window, recompute the HMAC over `"{t}.{raw body}"`, compare in
    /// constant time, and only then parse the JSON payload.
    ///
    /// # Errors
    ///
    /// Any [`WebhookError`]; the caller must reject the delivery with a
    /// client error and perform no mutation.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.check_timestamp(header.timestamp)?;

        let expected = self.signature_for(header.timestamp, payload);
        let verified = header
            .candidates
            .iter()
            .any(|candidate| constant_time_eq(&expected, candidate));
        if !verified {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    fn check_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let age = chrono::Utc::now().timestamp() - timestamp;
        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }
        Ok(())
    }

    fn signature_for(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time byte comparison; length mismatch short-circuits, which
/// leaks nothing useful (signature length is public).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

/// Build a valid `Stripe-Signature` header for test fixtures.
#[cfg(test)]
pub fn sign_for_test(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(payload);
    format!(
        "t={timestamp},v1={}",
        hex::encode(mac.finalize().into_bytes())
    )
}
