//! PostgreSQL adapter for the purchase ledger.
//!
//! The `(provider, provider_id)` uniqueness constraint plus
//! `ON CONFLICT DO NOTHING` is the whole idempotency mechanism: two
//! racing inserts for the same session both succeed, the database picks
//! the winner, and exactly one row exists afterwards. No in-process
//! locking, so the guarantee survives horizontal scaling.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::purchase::NewPurchase;
use crate::ports::{PurchaseLedger, RecordOutcome, StoreError};

/// PostgreSQL implementation of PurchaseLedger.
pub struct PgPurchaseLedger {
    pool: PgPool,
}

impl PgPurchaseLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseLedger for PgPurchaseLedger {
    async fn record(&self, purchase: NewPurchase) -> Result<RecordOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO purchases (user_id, provider, provider_id, amount, currency)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT ON CONSTRAINT purchases_provider_session DO NOTHING
            "#,
        )
        .bind(purchase.user_id)
        .bind(purchase.provider.as_str())
        .bind(&purchase.provider_id)
        .bind(purchase.amount)
        .bind(&purchase.currency)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::new("purchases.record", e.to_string()))?;

        if result.rows_affected() == 1 {
            Ok(RecordOutcome::Inserted)
        } else {
            Ok(RecordOutcome::Duplicate)
        }
    }
}
