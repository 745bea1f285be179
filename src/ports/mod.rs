//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TranslationProvider` - one upstream translation API behind a
//!   uniform call/response shape
//! - `PaymentGateway` - checkout-session creation at the payment provider
//! - `UserStore` / `PurchaseLedger` - durable user + purchase state
//! - `CertificateRenderer` - opaque document rendering capability

mod certificate_renderer;
mod payment_gateway;
mod store;
mod translator;

pub use certificate_renderer::{CertificateRenderer, RenderError};
pub use payment_gateway::{CheckoutSession, PaymentError, PaymentGateway};
pub use store::{PurchaseLedger, RecordOutcome, StoreError, UserStore};
pub use translator::{ProviderError, TranslationProvider};
