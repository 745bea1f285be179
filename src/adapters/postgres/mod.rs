//! PostgreSQL adapters for the storage ports.

mod purchase_repository;
mod user_repository;

pub use purchase_repository::PgPurchaseLedger;
pub use user_repository::PgUserStore;
