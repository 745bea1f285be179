//! Purchase ledger types.
//!
//! Ledger rows are append-only and keyed by `(provider, provider_id)`;
//! the provider's session id is the idempotency key that makes repeated
//! webhook deliveries collapse into a single row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment providers this gateway can record purchases from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProviderKind {
    Stripe,
}

impl PaymentProviderKind {
    /// Stable string form used as the ledger's `provider` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
        }
    }
}

impl std::fmt::Display for PaymentProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    /// Absent for anonymous purchases (no `userId` in session metadata).
    pub user_id: Option<Uuid>,
    pub provider: PaymentProviderKind,
    /// The provider's session id, unique per provider.
    pub provider_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// A purchase about to be recorded by the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub user_id: Option<Uuid>,
    pub provider: PaymentProviderKind,
    pub provider_id: String,
    pub amount: i64,
    pub currency: String,
}
