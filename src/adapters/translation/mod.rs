//! Translation provider adapters.
//!
//! Implementations of the `TranslationProvider` port:
//!
//! - `DeepLProvider` - DeepL REST API
//! - `LibreProvider` - LibreTranslate REST API
//! - `FallbackTranslator` - ordered fallback chain over configured providers
//! - `MockTranslationProvider` - configurable fake for testing

mod deepl;
mod fallback;
mod libre;
mod mock;

pub use deepl::{DeepLConfig, DeepLProvider};
pub use fallback::FallbackTranslator;
pub use libre::{LibreConfig, LibreProvider};
pub use mock::{MockFailure, MockTranslationProvider};
