//! LibreTranslate Provider - Implementation of TranslationProvider for
//! self-hosted or hosted LibreTranslate instances.
//!
//! `POST /translate` with a JSON body; the API key travels inside the
//! body rather than a header, and the response is a flat
//! `{"translatedText": ...}` object.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::translation::TranslationRequest;
use crate::ports::{ProviderError, TranslationProvider};

use super::deepl::map_transport_error;

/// Configuration for the LibreTranslate provider.
#[derive(Clone)]
pub struct LibreConfig {
    pub endpoint: String,
    api_key: Option<SecretString>,
    pub timeout: Duration,
}

impl LibreConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the API key required by hosted instances.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// LibreTranslate translation provider.
pub struct LibreProvider {
    config: LibreConfig,
    client: Client,
}

impl LibreProvider {
    pub fn new(config: LibreConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("HTTP client construction only fails on TLS backend misconfiguration");

        Self { config, client }
    }

    fn translate_url(&self) -> String {
        format!("{}/translate", self.config.endpoint.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

#[async_trait]
impl TranslationProvider for LibreProvider {
    fn name(&self) -> &'static str {
        "libre"
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let body = LibreRequest {
            q: request.text(),
            source: request.source_lang(),
            target: request.target_lang(),
            format: "text",
            api_key: self
                .config
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().clone()),
        };

        let response = self
            .client
            .post(self.translate_url())
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

        let parsed: LibreResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        match parsed.translated_text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(ProviderError::Malformed(
                "response carried no translatedText".to_string(),
            )),
        }
    }
}
