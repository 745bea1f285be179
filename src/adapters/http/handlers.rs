//! HTTP handlers for the gateway endpoints.
//!
//! The webhook handler is the only one with ordering constraints:
//! signature verification strictly precedes any storage mutation, and a
//! verified delivery is acknowledged even when the apply-side storage
//! call fails (logged for out-of-band reconciliation) so the provider
//! does not retry a durably delivered event forever.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::adapters::translation::FallbackTranslator;
use crate::application::{CompletedCheckout, PurchaseReconciler};
use crate::domain::certificate::Certificate;
use crate::domain::payment::{StripeWebhookVerifier, WebhookError};
use crate::domain::translation::TranslationRequest;
use crate::ports::{CertificateRenderer, PaymentError, PaymentGateway, UserStore};

use super::dto::{
    CheckoutResponse, CreateCheckoutBody, ErrorResponse, HealthResponse, RegisterBody,
    TranslateRequestBody, TranslateResponse, UserResponse, WebhookAck,
};

// ════════════════════════════════════════════════════════════════════════════
// Application state
// ════════════════════════════════════════════════════════════════════════════

/// Fixed product price used when a completion event omits amounts.
#[derive(Debug, Clone)]
pub struct PaymentDefaults {
    pub unit_amount: i64,
    pub currency: String,
}

/// Shared application state; cloned per request, dependencies are
/// `Arc`-wrapped and read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<FallbackTranslator>,
    /// Absent when payment credentials are not configured.
    pub payment_gateway: Option<Arc<dyn PaymentGateway>>,
    /// Absent when the webhook signing secret is not configured.
    pub webhook_verifier: Option<Arc<StripeWebhookVerifier>>,
    pub reconciler: Arc<PurchaseReconciler>,
    pub users: Arc<dyn UserStore>,
    pub certificates: Arc<dyn CertificateRenderer>,
    pub payment_defaults: PaymentDefaults,
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// POST /api/translate
pub async fn translate(
    State(state): State<AppState>,
    Json(body): Json<TranslateRequestBody>,
) -> Response {
    let request = match TranslationRequest::new(
        body.q.unwrap_or_default(),
        body.source.unwrap_or_default(),
        body.target.unwrap_or_default(),
    ) {
        Ok(request) => request,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
                .into_response()
        }
    };

    match state.translator.translate(&request).await {
        Ok(translation) => Json(TranslateResponse {
            translated_text: translation.text,
            provider: translation.provider,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Translation failed hard");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("TranslationFailed")),
            )
                .into_response()
        }
    }
}

/// POST /api/create-checkout-session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(body): Json<CreateCheckoutBody>,
) -> Response {
    let Some(gateway) = &state.payment_gateway else {
        tracing::error!(
            error = %PaymentError::NotConfigured,
            "Checkout requested without payment credentials"
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("PaymentNotConfigured")),
        )
            .into_response();
    };

    let user_id = body.user_id.as_deref().filter(|id| !id.is_empty());

    match gateway.create_checkout_session(user_id).await {
        Ok(session) => Json(CheckoutResponse {
            id: session.id,
            url: session.url,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = ?user_id, "Checkout session creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("PaymentProviderError")),
            )
                .into_response()
        }
    }
}

/// POST /webhook
///
/// Takes the byte-exact body: any re-serialization before verification
/// would invalidate the signature.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(verifier) = &state.webhook_verifier else {
        return reject_webhook(WebhookError::NotConfigured);
    };

    let Some(signature) = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
    else {
        return reject_webhook(WebhookError::MissingSignatureHeader);
    };

    let event = match verifier.verify_and_parse(&body, signature) {
        Ok(event) => event,
        Err(e) => return reject_webhook(e),
    };

    if !event.is_checkout_completed() {
        tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Event acknowledged without processing");
        return Json(WebhookAck { received: true }).into_response();
    }

    let session = match event.checkout_session() {
        Ok(session) => session,
        Err(e) => return reject_webhook(WebhookError::ParseError(e.to_string())),
    };

    let user_id = session.user_id().and_then(|raw| match raw.parse::<Uuid>() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(
                session_id = %session.id,
                user_id = raw,
                "Completion carries a non-UUID userId, recording as anonymous"
            );
            None
        }
    });

    let checkout = CompletedCheckout {
        session_id: session.id.clone(),
        user_id,
        amount: session
            .amount_total
            .unwrap_or(state.payment_defaults.unit_amount),
        currency: session
            .currency
            .clone()
            .unwrap_or_else(|| state.payment_defaults.currency.clone()),
    };

    // Storage failure does not change the acknowledgement: the provider
    // has delivered durably, operators reconcile from this log line.
    if let Err(e) = state.reconciler.apply(checkout).await {
        tracing::error!(
            session_id = %session.id,
            error = %e,
            "Failed to apply verified completion event"
        );
    }

    Json(WebhookAck { received: true }).into_response()
}

fn reject_webhook(error: WebhookError) -> Response {
    tracing::warn!(error = %error, "Webhook delivery rejected");
    (
        error.status_code(),
        Json(ErrorResponse::new(format!("Webhook Error: {error}"))),
    )
        .into_response()
}

/// GET /api/certificate/:name/:level
///
/// `name` arrives URL-decoded from the router; `level` is clamped into
/// the title table's range.
pub async fn certificate(
    State(state): State<AppState>,
    Path((name, level)): Path<(String, i64)>,
) -> Response {
    let certificate = Certificate::new(name, level, Utc::now());

    match state.certificates.render(&certificate) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", certificate.filename()),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, level = certificate.level, "Certificate rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("RenderError")),
            )
                .into_response()
        }
    }
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Response {
    let email = body.email.unwrap_or_default();
    if email.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing required field: email")),
        )
            .into_response();
    }

    match state.users.upsert_by_email(email.trim()).await {
        Ok(user) => Json(UserResponse::from(user)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("StorageFailure")),
            )
                .into_response()
        }
    }
}

/// GET /api/me/:id
pub async fn me(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.users.find_by_id(id).await {
        Ok(user) => Json(user.map(UserResponse::from)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, user_id = %id, "Profile read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("StorageFailure")),
            )
                .into_response()
        }
    }
}
