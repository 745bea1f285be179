//! Payment webhook domain: event model, signature verification, and the
//! webhook error taxonomy.

mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use stripe_event::{CheckoutSessionObject, StripeEvent, StripeEventData, CHECKOUT_COMPLETED};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier};

#[cfg(test)]
pub use webhook_verifier::sign_for_test;
