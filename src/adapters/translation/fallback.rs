//! Fallback Translator - ordered fallback chain over translation
//! providers.
//!
//! Adapters are consulted in priority order; the first well-formed
//! translation wins and later adapters are never called. Soft failures
//! (timeouts, upstream errors, malformed payloads) are logged and fall
//! through. When no adapter is configured, or every configured adapter
//! soft-fails, the caller gets the deterministic placeholder tagged
//! `provider: "none"` instead of an error.

use std::sync::Arc;
use std::time::Duration;

use crate::config::TranslationConfig;
use crate::domain::translation::{Translation, TranslationRequest};
use crate::ports::{ProviderError, TranslationProvider};

use super::{DeepLConfig, DeepLProvider, LibreConfig, LibreProvider};

/// Coordinator walking configured providers in priority order.
pub struct FallbackTranslator {
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl FallbackTranslator {
    /// Builds a chain from an explicit provider list (highest priority
    /// first). Used directly by tests with mocks.
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    /// Builds the chain from configuration: DeepL first, then
    /// LibreTranslate. An adapter is constructed only when its
    /// credentials/endpoint are present.
    pub fn from_config(config: &TranslationConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut providers: Vec<Arc<dyn TranslationProvider>> = Vec::new();

        if let Some(api_key) = &config.deepl_api_key {
            let mut deepl = DeepLConfig::new(api_key.clone()).with_timeout(timeout);
            if let Some(endpoint) = &config.deepl_endpoint {
                deepl = deepl.with_endpoint(endpoint.clone());
            }
            providers.push(Arc::new(DeepLProvider::new(deepl)));
        }

        if let Some(endpoint) = &config.libre_endpoint {
            let mut libre = LibreConfig::new(endpoint.clone()).with_timeout(timeout);
            if let Some(api_key) = &config.libre_api_key {
                libre = libre.with_api_key(api_key.clone());
            }
            providers.push(Arc::new(LibreProvider::new(libre)));
        }

        Self { providers }
    }

    /// Provider tags in priority order, for startup logging.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Translate with fallback.
    ///
    /// # Errors
    ///
    /// Only non-soft failures (provider misconfiguration) escape; every
    /// upstream failure degrades to the placeholder instead.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Translation, ProviderError> {
        for provider in &self.providers {
            match provider.translate(request).await {
                Ok(text) if !text.trim().is_empty() => {
                    return Ok(Translation::new(text, provider.name()));
                }
                Ok(_) => {
                    tracing::warn!(
                        provider = provider.name(),
                        "Provider returned empty translation, falling through"
                    );
                }
                Err(e) if e.is_soft() => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        "Provider failed, falling through"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(
            configured = self.providers.len(),
            "No provider produced a translation, returning placeholder"
        );
        Ok(Translation::untranslated(request.text()))
    }
}
