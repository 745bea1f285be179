//! Purchase reconciliation.
//!
//! Applies a verified checkout completion to entitlement and ledger
//! state effectively exactly-once, despite at-least-once webhook
//! delivery and concurrent redelivery:
//!
//! 1. The premium flag is commutative and idempotent, so it is set
//!    unconditionally and can be repeated safely.
//! 2. The ledger insert is guarded by the storage engine's
//!    `(provider, provider_id)` uniqueness; the losing side of a race
//!    observes `Duplicate` and nothing else happens.
//!
//! Callers only reach this after signature verification; an unverified
//! payload can never get here.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::purchase::{NewPurchase, PaymentProviderKind};
use crate::ports::{PurchaseLedger, RecordOutcome, StoreError, UserStore};

/// A verified, decoded checkout completion ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedCheckout {
    /// Provider session id — the idempotency key.
    pub session_id: String,
    /// Linked user, or `None` for an anonymous purchase.
    pub user_id: Option<Uuid>,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
}

/// What applying a completion did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// First delivery: ledger row created (and entitlement granted).
    Applied,
    /// Redelivery: the ledger already carried this session.
    AlreadyRecorded,
}

/// Applies checkout completions to entitlement + ledger state.
pub struct PurchaseReconciler {
    users: Arc<dyn UserStore>,
    ledger: Arc<dyn PurchaseLedger>,
}

impl PurchaseReconciler {
    pub fn new(users: Arc<dyn UserStore>, ledger: Arc<dyn PurchaseLedger>) -> Self {
        Self { users, ledger }
    }

    /// Apply one verified completion.
    ///
    /// # Errors
    ///
    /// `StoreError` when persistence fails; the webhook handler logs it
    /// and still acknowledges the delivery (documented trade-off — the
    /// provider must not retry a durably delivered event forever).
    pub async fn apply(
        &self,
        checkout: CompletedCheckout,
    ) -> Result<ReconcileOutcome, StoreError> {
        if let Some(user_id) = checkout.user_id {
            self.users.set_premium(user_id).await?;
        }

        let outcome = self
            .ledger
            .record(NewPurchase {
                user_id: checkout.user_id,
                provider: PaymentProviderKind::Stripe,
                provider_id: checkout.session_id.clone(),
                amount: checkout.amount,
                currency: checkout.currency.clone(),
            })
            .await?;

        match outcome {
            RecordOutcome::Inserted => {
                tracing::info!(
                    session_id = %checkout.session_id,
                    user_id = ?checkout.user_id,
                    amount = checkout.amount,
                    "Purchase recorded"
                );
                Ok(ReconcileOutcome::Applied)
            }
            RecordOutcome::Duplicate => {
                tracing::info!(
                    session_id = %checkout.session_id,
                    "Duplicate delivery ignored, purchase already recorded"
                );
                Ok(ReconcileOutcome::AlreadyRecorded)
            }
        }
    }
}
