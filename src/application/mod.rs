//! Application services.

mod reconcile;

pub use reconcile::{CompletedCheckout, PurchaseReconciler, ReconcileOutcome};
