//! Translation request and result types.
//!
//! Validation happens here, before any upstream call is attempted: a
//! request with any empty field never reaches an adapter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source_lang: String,
    target_lang: String,
}

/// Rejection for a malformed translation request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidTranslationRequest {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl TranslationRequest {
    /// Builds a request, rejecting empty or whitespace-only fields.
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Result<Self, InvalidTranslationRequest> {
        let text = text.into();
        let source_lang = source_lang.into();
        let target_lang = target_lang.into();

        if text.trim().is_empty() {
            return Err(InvalidTranslationRequest::MissingField("q"));
        }
        if source_lang.trim().is_empty() {
            return Err(InvalidTranslationRequest::MissingField("source"));
        }
        if target_lang.trim().is_empty() {
            return Err(InvalidTranslationRequest::MissingField("target"));
        }

        Ok(Self {
            text,
            source_lang,
            target_lang,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }
}

/// A translation result tagged with the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    /// Adapter tag, or `"none"` for the deterministic fallback.
    pub provider: String,
}

impl Translation {
    pub fn new(text: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provider: provider.into(),
        }
    }

    /// The deterministic placeholder returned when no adapter is
    /// configured or every configured adapter soft-failed.
    pub fn untranslated(original: &str) -> Self {
        Self {
            text: format!("[untranslated] {original}"),
            provider: "none".to_string(),
        }
    }
}
