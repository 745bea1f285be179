//! Wire DTOs for the HTTP surface.
//!
//! Request bodies keep every field optional so missing-field validation
//! can answer with a clean 400 instead of a deserialization rejection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::User;

/// GET /health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// POST /api/translate request body.
#[derive(Debug, Deserialize)]
pub struct TranslateRequestBody {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// POST /api/translate response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
    pub provider: String,
}

/// POST /api/create-checkout-session request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutBody {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /api/create-checkout-session response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: String,
    pub url: String,
}

/// POST /webhook acknowledgement.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /api/register request body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub email: Option<String>,
}

/// User row as served to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub points: i32,
    pub level: i32,
    pub is_premium: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            points: user.points,
            level: user.level,
            is_premium: user.is_premium,
        }
    }
}

/// Error body; `error` is a stable label or a verification reason,
/// never internal detail.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
