//! Payment configuration (Stripe)
//!
//! Both secrets are optional: when either is absent the corresponding
//! endpoint answers with a typed `NotConfigured` error instead of the
//! process refusing to start.

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (presence enables checkout-session creation)
    pub stripe_secret_key: Option<String>,

    /// Stripe webhook signing secret (presence enables webhook verification)
    pub stripe_webhook_secret: Option<String>,

    /// Public base URL used to build checkout redirect URLs
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Display name of the single product this gateway sells
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Price of the product in minor currency units
    #[serde(default = "default_unit_amount")]
    pub unit_amount: i64,

    /// ISO currency code for the product price
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// True when checkout-session creation is possible.
    pub fn checkout_configured(&self) -> bool {
        self.stripe_secret_key.is_some()
    }

    /// True when inbound webhooks can be verified.
    pub fn webhook_configured(&self) -> bool {
        self.stripe_webhook_secret.is_some()
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.stripe_secret_key {
            if !key.starts_with("sk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidPublicBaseUrl);
        }
        if self.unit_amount <= 0 {
            return Err(ValidationError::InvalidUnitAmount);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_webhook_secret: None,
            public_base_url: default_public_base_url(),
            product_name: default_product_name(),
            unit_amount: default_unit_amount(),
            currency: default_currency(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_product_name() -> String {
    "Premium upgrade".to_string()
}

fn default_unit_amount() -> i64 {
    999
}

fn default_currency() -> String {
    "eur".to_string()
}
