//! Translation provider port.
//!
//! Each upstream translation API is wrapped by one adapter implementing
//! this trait, so the fallback coordinator stays provider-agnostic and
//! can be tested with fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::translation::TranslationRequest;

/// Port for a single upstream translation provider.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short stable tag reported back to callers (e.g. `"deepl"`).
    fn name(&self) -> &'static str;

    /// Translate one request, returning the translated text.
    ///
    /// Implementations must bound the upstream call with a timeout and
    /// must return `ProviderError::Malformed` rather than an empty
    /// string when the upstream response carries no usable translation.
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;
}

/// Failure of one provider adapter.
///
/// Everything except `Configuration` is a soft failure: the coordinator
/// logs it and falls through to the next adapter. `Configuration` means
/// the adapter could not even construct a request and surfaces as a
/// request-level failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Upstream call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Upstream returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Malformed upstream response: {0}")]
    Malformed(String),

    #[error("Provider misconfigured: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// True when the coordinator should fall through to the next
    /// adapter instead of failing the request.
    pub fn is_soft(&self) -> bool {
        !matches!(self, ProviderError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn TranslationProvider) {}
    }

    #[test]
    fn upstream_failures_are_soft() {
        assert!(ProviderError::Timeout { timeout_secs: 10 }.is_soft());
        assert!(ProviderError::Api {
            status: 502,
            detail: "bad gateway".to_string()
        }
        .is_soft());
        assert!(ProviderError::Network("reset".to_string()).is_soft());
        assert!(ProviderError::Malformed("no text".to_string()).is_soft());
    }

    #[test]
    fn configuration_failure_is_hard() {
        assert!(!ProviderError::Configuration("bad endpoint".to_string()).is_soft());
    }
}
