//! Stripe webhook event types.
//!
//! Only the fields this gateway acts on are modelled; everything else in
//! Stripe's event schema is ignored by serde.

use std::collections::HashMap;

use serde::Deserialize;

/// Event type string that drives entitlement mutation. All other event
/// types are acknowledged without touching storage.
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

/// A Stripe webhook event, reduced to the fields we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    /// Event identifier (`evt_...`).
    pub id: String,

    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event-specific payload container.
    pub data: StripeEventData,
}

/// Container for the polymorphic event object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// True when this event completes a checkout session.
    pub fn is_checkout_completed(&self) -> bool {
        self.event_type == CHECKOUT_COMPLETED
    }

    /// Decode the event object as a checkout session.
    pub fn checkout_session(&self) -> Result<CheckoutSessionObject, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// The checkout session object carried by a completion event.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    /// Session id (`cs_...`) — the purchase idempotency key.
    pub id: String,

    /// Total amount in minor currency units, when Stripe includes it.
    #[serde(default)]
    pub amount_total: Option<i64>,

    /// ISO currency code, when Stripe includes it.
    #[serde(default)]
    pub currency: Option<String>,

    /// Metadata attached at session creation; `userId` links the purchase
    /// to a registered user.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSessionObject {
    /// The internal user id tagged on the session, if any.
    ///
    /// An absent or empty `userId` means an anonymous purchase.
    pub fn user_id(&self) -> Option<&str> {
        self.metadata
            .get("userId")
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
