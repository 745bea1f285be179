//! Payment gateway port.
//!
//! Covers the one payment-provider operation this gateway initiates:
//! creating a provider-hosted checkout session for the fixed product.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A provider-hosted checkout session.
///
/// The session `id` is the join key presented back later in the
/// completion webhook, linking "session created for user X" to
/// "session completed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Port for the payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout session for the fixed product, tagging it with
    /// the internal user id (or an empty tag when absent).
    async fn create_checkout_session(
        &self,
        user_id: Option<&str>,
    ) -> Result<CheckoutSession, PaymentError>;
}

/// Errors from payment gateway operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payment credentials are absent; checked before any network call.
    #[error("Payment provider not configured")]
    NotConfigured,

    /// The provider rejected or failed the call.
    #[error("Payment provider error: {0}")]
    Provider(String),

    /// The provider could not be reached.
    #[error("Network failure reaching payment provider: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn errors_carry_no_upstream_body_by_construction() {
        let err = PaymentError::Provider("status 402".to_string());
        assert_eq!(err.to_string(), "Payment provider error: status 402");
    }
}
