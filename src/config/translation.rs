//! Translation provider configuration
//!
//! Each upstream provider is optional: an adapter is only constructed when
//! its credentials/endpoint are present, which is what gates it into the
//! fallback chain.

use serde::Deserialize;

use super::error::ValidationError;

/// Translation provider configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationConfig {
    /// DeepL API key (presence enables the DeepL adapter)
    pub deepl_api_key: Option<String>,

    /// DeepL API endpoint override (defaults to the free-tier endpoint)
    pub deepl_endpoint: Option<String>,

    /// LibreTranslate endpoint (presence enables the LibreTranslate adapter)
    pub libre_endpoint: Option<String>,

    /// LibreTranslate API key (optional even when the endpoint is set)
    pub libre_api_key: Option<String>,

    /// Per-request timeout for upstream translation calls, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslationConfig {
    /// True when at least one upstream provider is configured.
    pub fn any_provider_configured(&self) -> bool {
        self.deepl_api_key.is_some() || self.libre_endpoint.is_some()
    }

    /// Validate translation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for endpoint in [self.deepl_endpoint.as_deref(), self.libre_endpoint.as_deref()]
            .into_iter()
            .flatten()
        {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidTranslationEndpoint);
            }
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_providers_by_default() {
        let config = TranslationConfig::default();
        assert!(!config.any_provider_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deepl_key_alone_enables_a_provider() {
        let config = TranslationConfig {
            deepl_api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(config.any_provider_configured());
    }

    #[test]
    fn validation_rejects_non_http_endpoint() {
        let config = TranslationConfig {
            libre_endpoint: Some("localhost:5000".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_accepts_https_endpoint() {
        let config = TranslationConfig {
            libre_endpoint: Some("https://libretranslate.example.com".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
