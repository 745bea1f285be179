//! Certificate renderer port.
//!
//! The document renderer is an opaque external capability; the gateway
//! only needs bytes back.

use thiserror::Error;

use crate::domain::certificate::Certificate;

/// A failure inside the underlying document renderer; fatal to the
/// current request only.
#[derive(Debug, Error)]
#[error("Certificate rendering failed: {0}")]
pub struct RenderError(pub String);

/// Port for rendering a certificate into a document byte stream.
pub trait CertificateRenderer: Send + Sync {
    fn render(&self, certificate: &Certificate) -> Result<Vec<u8>, RenderError>;
}
