//! Provider registry.
//!
//! - `tfidf`: hashing TF-IDF, always available
//! - `ollama`: local Ollama server over HTTP

pub mod ollama_provider;
pub mod tfidf_fallback;

pub use ollama_provider::OllamaProvider;
pub use tfidf_fallback::TfIdfFallback;

use kb_core::config::EmbeddingConfig;
use kb_core::errors::{ConfigurationError, KbResult};
use kb_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Build the configured provider. Unknown names are a configuration error.
///
/// An unreachable Ollama server is not an error here: the provider is
/// returned unavailable and the fallback chain skips it.
pub fn create_provider(config: &EmbeddingConfig) -> KbResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "tfidf" => {
            info!(provider = "tfidf", "using TF-IDF embedding provider");
            Ok(Box::new(TfIdfFallback::new(config.dimensions)))
        }
        "ollama" => {
            let provider = OllamaProvider::new(
                config.model.clone(),
                config.dimensions,
                config.base_url.clone(),
            );
            if provider.health_check() {
                info!(provider = "ollama", model = %config.model, "embedding provider connected");
            } else {
                warn!(model = %config.model, "Ollama unavailable, TF-IDF fallback will serve");
            }
            Ok(Box::new(provider))
        }
        other => Err(ConfigurationError::UnknownProvider {
            name: other.to_string(),
        }
        .into()),
    }
}
