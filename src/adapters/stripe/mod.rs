//! Stripe adapters.
//!
//! `StripeCheckout` implements the `PaymentGateway` port against the
//! Stripe REST API. Webhook verification lives in the domain
//! (`domain::payment`) because it is pure computation over the raw body.

mod checkout;

pub use checkout::{StripeCheckout, StripeCheckoutConfig};
