//! Lingua Gateway server binary.
//!
//! Bootstraps configuration, tracing, the database pool, and the
//! dependency graph, then serves the axum router. Components never read
//! ambient environment state after this point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lingua_gateway::adapters::http::{api_router, AppState, PaymentDefaults};
use lingua_gateway::adapters::postgres::{PgPurchaseLedger, PgUserStore};
use lingua_gateway::adapters::stripe::{StripeCheckout, StripeCheckoutConfig};
use lingua_gateway::adapters::translation::FallbackTranslator;
use lingua_gateway::adapters::pdf::PdfCertificateRenderer;
use lingua_gateway::application::PurchaseReconciler;
use lingua_gateway::config::AppConfig;
use lingua_gateway::domain::payment::StripeWebhookVerifier;
use lingua_gateway::ports::{PaymentGateway, PurchaseLedger, UserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let translator = Arc::new(FallbackTranslator::from_config(&config.translation));
    tracing::info!(
        providers = ?translator.provider_names(),
        "Translation provider chain configured"
    );

    let payment_gateway: Option<Arc<dyn PaymentGateway>> =
        StripeCheckoutConfig::from_config(&config.payment)
            .map(|cfg| Arc::new(StripeCheckout::new(cfg)) as Arc<dyn PaymentGateway>);
    if payment_gateway.is_none() {
        tracing::warn!("Stripe secret key absent, checkout endpoint disabled");
    }

    let webhook_verifier = config
        .payment
        .stripe_webhook_secret
        .as_ref()
        .map(|secret| Arc::new(StripeWebhookVerifier::new(secret.clone())));
    if webhook_verifier.is_none() {
        tracing::warn!("Webhook signing secret absent, webhook deliveries will be rejected");
    }

    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let ledger: Arc<dyn PurchaseLedger> = Arc::new(PgPurchaseLedger::new(pool.clone()));
    let reconciler = Arc::new(PurchaseReconciler::new(users.clone(), ledger));

    let state = AppState {
        translator,
        payment_gateway,
        webhook_verifier,
        reconciler,
        users,
        certificates: Arc::new(PdfCertificateRenderer::new()),
        payment_defaults: PaymentDefaults {
            unit_amount: config.payment.unit_amount,
            currency: config.payment.currency.clone(),
        },
    };

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::permissive(),
        origins => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Lingua Gateway listening");

    axum::serve(listener, app).await?;

    Ok(())
}
