//! Adapters - Implementations of port interfaces.
//!
//! - `translation` - upstream translation providers + fallback chain
//! - `stripe` - checkout-session creation
//! - `postgres` - user store and purchase ledger
//! - `pdf` - certificate rendering
//! - `http` - axum routes, handlers, and DTOs

pub mod http;
pub mod pdf;
pub mod postgres;
pub mod stripe;
pub mod translation;
