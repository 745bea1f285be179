//! DeepL Provider - Implementation of TranslationProvider for DeepL.
//!
//! Uses the JSON flavor of `POST /v2/translate` with `DeepL-Auth-Key`
//! header authentication. DeepL expects upper-cased language codes and
//! answers with a `translations` array.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::translation::TranslationRequest;
use crate::ports::{ProviderError, TranslationProvider};

/// Configuration for the DeepL provider.
#[derive(Clone)]
pub struct DeepLConfig {
    api_key: SecretString,
    pub endpoint: String,
    pub timeout: Duration,
}

impl DeepLConfig {
    /// Creates a configuration for the free-tier endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            endpoint: "https://api-free.deepl.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Overrides the API endpoint (paid tier, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// DeepL translation provider.
pub struct DeepLProvider {
    config: DeepLConfig,
    client: Client,
}

impl DeepLProvider {
    pub fn new(config: DeepLConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("HTTP client construction only fails on TLS backend misconfiguration");

        Self { config, client }
    }

    fn translate_url(&self) -> String {
        format!("{}/v2/translate", self.config.endpoint.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct DeepLRequest<'a> {
    text: [&'a str; 1],
    source_lang: String,
    target_lang: String,
}

#[derive(Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Deserialize)]
struct DeepLTranslation {
    text: String,
}

#[async_trait]
impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let body = DeepLRequest {
            text: [request.text()],
            source_lang: request.source_lang().to_uppercase(),
            target_lang: request.target_lang().to_uppercase(),
        };

        let response = self
            .client
            .post(self.translate_url())
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", self.config.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error(&self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let parsed: DeepLResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        match parsed.translations.into_iter().next() {
            Some(t) if !t.text.trim().is_empty() => Ok(t.text),
            _ => Err(ProviderError::Malformed(
                "response carried no translation text".to_string(),
            )),
        }
    }
}

/// Maps reqwest transport errors onto the provider error taxonomy.
pub(super) fn map_transport_error(
    timeout: &Duration,
) -> impl Fn(reqwest::Error) -> ProviderError + '_ {
    move |e: reqwest::Error| {
        if e.is_timeout() {
            ProviderError::Timeout {
                timeout_secs: timeout.as_secs(),
            }
        } else if e.is_builder() {
            // Request could not even be constructed (bad endpoint URL).
            ProviderError::Configuration(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}
