//! Lingua Gateway - Integration gateway for translation, payment
//! collection, and certificate issuance.
//!
//! Fronts three independent external capabilities behind a small HTTP
//! API, backed by a durable user/entitlement store. The core design
//! content is the payment-to-entitlement reconciliation path and the
//! translation provider fallback chain.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
