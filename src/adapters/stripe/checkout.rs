//! Stripe checkout adapter.
//!
//! Creates provider-hosted checkout sessions for the gateway's single
//! fixed product. The internal user id rides along as session metadata
//! and comes back in the completion webhook; the `{CHECKOUT_SESSION_ID}`
//! token in the success URL is substituted by Stripe.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::PaymentConfig;
use crate::ports::{CheckoutSession, PaymentError, PaymentGateway};

/// Configuration for the Stripe checkout adapter.
#[derive(Clone)]
pub struct StripeCheckoutConfig {
    secret_key: SecretString,
    pub api_base_url: String,
    pub public_base_url: String,
    pub product_name: String,
    pub unit_amount: i64,
    pub currency: String,
    pub timeout: Duration,
}

impl StripeCheckoutConfig {
    /// Builds the adapter configuration, or `None` when the secret key
    /// is absent (payment endpoints then answer `NotConfigured`).
    pub fn from_config(payment: &PaymentConfig) -> Option<Self> {
        let secret_key = payment.stripe_secret_key.as_ref()?;
        Some(Self {
            secret_key: SecretString::new(secret_key.clone()),
            api_base_url: "https://api.stripe.com".to_string(),
            public_base_url: payment.public_base_url.trim_end_matches('/').to_string(),
            product_name: payment.product_name.clone(),
            unit_amount: payment.unit_amount,
            currency: payment.currency.clone(),
            timeout: Duration::from_secs(15),
        })
    }

    /// Set a custom API base URL (for testing).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe implementation of the `PaymentGateway` port.
pub struct StripeCheckout {
    config: StripeCheckoutConfig,
    client: Client,
}

impl StripeCheckout {
    pub fn new(config: StripeCheckoutConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("HTTP client construction only fails on TLS backend misconfiguration");

        Self { config, client }
    }

    fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.config.api_base_url)
    }

    /// Form parameters for the fixed single line item session.
    fn session_params(&self, user_id: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            (
                "line_items[0][price_data][currency]",
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                self.config.product_name.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                self.config.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("metadata[userId]", user_id.unwrap_or_default().to_string()),
            (
                "success_url",
                format!(
                    "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.config.public_base_url
                ),
            ),
            (
                "cancel_url",
                format!("{}/cancel", self.config.public_base_url),
            ),
        ]
    }
}

#[derive(Deserialize)]
struct StripeSessionResponse {
    id: String,
    url: String,
}

#[async_trait]
impl PaymentGateway for StripeCheckout {
    async fn create_checkout_session(
        &self,
        user_id: Option<&str>,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(self.sessions_url())
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&self.session_params(user_id))
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                detail = %detail,
                "Stripe checkout session creation failed"
            );
            return Err(PaymentError::Provider(format!("status {status}")));
        }

        let session: StripeSessionResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(format!("unparseable response: {e}")))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StripeCheckoutConfig {
        StripeCheckoutConfig::from_config(&PaymentConfig {
            stripe_secret_key: Some("sk_test_xxx".to_string()),
            public_base_url: "https://gateway.example.com/".to_string(),
            product_name: "Premium upgrade".to_string(),
            unit_amount: 999,
            currency: "eur".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn from_config_requires_secret_key() {
        assert!(StripeCheckoutConfig::from_config(&PaymentConfig::default()).is_none());
    }

    #[test]
    fn session_params_embed_user_id() {
        let adapter = StripeCheckout::new(config());
        let params = adapter.session_params(Some("user-123"));

        let metadata = params
            .iter()
            .find(|(k, _)| *k == "metadata[userId]")
            .unwrap();
        assert_eq!(metadata.1, "user-123");
    }

    #[test]
    fn session_params_use_empty_tag_for_anonymous() {
        let adapter = StripeCheckout::new(config());
        let params = adapter.session_params(None);

        let metadata = params
            .iter()
            .find(|(k, _)| *k == "metadata[userId]")
            .unwrap();
        assert_eq!(metadata.1, "");
    }

    #[test]
    fn success_url_carries_session_id_placeholder() {
        let adapter = StripeCheckout::new(config());
        let params = adapter.session_params(None);

        let success = params.iter().find(|(k, _)| *k == "success_url").unwrap();
        assert_eq!(
            success.1,
            "https://gateway.example.com/success?session_id={CHECKOUT_SESSION_ID}"
        );
        let cancel = params.iter().find(|(k, _)| *k == "cancel_url").unwrap();
        assert_eq!(cancel.1, "https://gateway.example.com/cancel");
    }

    #[test]
    fn line_item_is_fixed_product_quantity_one() {
        let adapter = StripeCheckout::new(config());
        let params = adapter.session_params(None);

        let find = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(find("mode"), Some("payment"));
        assert_eq!(find("line_items[0][price_data][currency]"), Some("eur"));
        assert_eq!(find("line_items[0][price_data][unit_amount]"), Some("999"));
        assert_eq!(find("line_items[0][quantity]"), Some("1"));
    }
}
