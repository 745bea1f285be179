//! Storage ports: user store and purchase ledger.
//!
//! The ledger's `record` is the idempotency boundary for webhook
//! redelivery: implementations must guarantee at most one row per
//! `(provider, provider_id)` using the storage engine's own uniqueness
//! guarantee, never an in-process lock, so the guarantee holds across
//! horizontally scaled instances.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::purchase::NewPurchase;
use crate::domain::user::User;

/// A failed persistence call, with enough context to diagnose from logs.
#[derive(Debug, Error)]
#[error("Storage failure during {operation}: {detail}")]
pub struct StoreError {
    pub operation: &'static str,
    pub detail: String,
}

impl StoreError {
    pub fn new(operation: &'static str, detail: impl Into<String>) -> Self {
        Self {
            operation,
            detail: detail.into(),
        }
    }
}

/// Port for durable user state.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user by email, or return the existing row on conflict.
    ///
    /// Re-registering an existing email is a no-op that returns the
    /// existing record.
    async fn upsert_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Point-in-time read by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Grant the premium entitlement. Idempotent: setting an
    /// already-premium user is a no-op, so redelivery is safe.
    async fn set_premium(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Outcome of a ledger insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// This call created the row.
    Inserted,
    /// A row for this `(provider, provider_id)` already existed; this
    /// delivery was a duplicate.
    Duplicate,
}

/// Port for the append-only purchase ledger.
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Record a purchase, ignoring duplicates of the same provider
    /// session. Two racing calls for the same session must both
    /// succeed, with exactly one reporting `Inserted`.
    async fn record(&self, purchase: NewPurchase) -> Result<RecordOutcome, StoreError>;
}
