//! Mock translation provider for testing.
//!
//! Configurable with a canned response or failure, and counts calls so
//! tests can assert that validation rejected a request before any
//! adapter was consulted, or that a later adapter was never reached.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::domain::translation::TranslationRequest;
use crate::ports::{ProviderError, TranslationProvider};

/// Failure modes the mock can simulate.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Timeout,
    Api { status: u16 },
    Malformed,
    Configuration,
}

impl MockFailure {
    fn to_error(&self) -> ProviderError {
        match self {
            MockFailure::Timeout => ProviderError::Timeout { timeout_secs: 10 },
            MockFailure::Api { status } => ProviderError::Api {
                status: *status,
                detail: "mock upstream error".to_string(),
            },
            MockFailure::Malformed => {
                ProviderError::Malformed("mock malformed response".to_string())
            }
            MockFailure::Configuration => {
                ProviderError::Configuration("mock misconfiguration".to_string())
            }
        }
    }
}

enum MockBehavior {
    Respond(String),
    Fail(MockFailure),
}

/// Configurable fake implementing the `TranslationProvider` port.
pub struct MockTranslationProvider {
    name: &'static str,
    behavior: MockBehavior,
    calls: AtomicU32,
}

impl MockTranslationProvider {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            behavior: MockBehavior::Respond(String::new()),
            calls: AtomicU32::new(0),
        }
    }

    /// Respond with the given translated text.
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.behavior = MockBehavior::Respond(text.into());
        self
    }

    /// Fail every call with the given failure mode.
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.behavior = MockBehavior::Fail(failure);
        self
    }

    /// Number of `translate` calls received.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for MockTranslationProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn translate(&self, _request: &TranslationRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Respond(text) => Ok(text.clone()),
            MockBehavior::Fail(failure) => Err(failure.to_error()),
        }
    }
}
