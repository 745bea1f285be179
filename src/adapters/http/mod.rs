//! HTTP adapter: axum routes, handlers, and wire DTOs.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AppState, PaymentDefaults};
pub use routes::api_router;
