//! Axum router for the gateway API.
//!
//! The webhook route sits on the same router but carries no
//! authentication: its trust boundary is the signature verification in
//! the handler, not middleware.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    certificate, create_checkout_session, health, me, register, stripe_webhook, translate,
    AppState,
};

/// Build the API router.
///
/// # Routes
///
/// - `GET  /health` - liveness probe
/// - `POST /api/translate` - translation with provider fallback
/// - `POST /api/create-checkout-session` - provider-hosted checkout
/// - `POST /webhook` - payment provider webhook (signature verified)
/// - `GET  /api/certificate/:name/:level` - PDF certificate download
/// - `POST /api/register` - idempotent registration by email
/// - `GET  /api/me/:id` - profile read
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/translate", post(translate))
        .route("/api/create-checkout-session", post(create_checkout_session))
        .route("/webhook", post(stripe_webhook))
        .route("/api/certificate/:name/:level", get(certificate))
        .route("/api/register", post(register))
        .route("/api/me/:id", get(me))
}
