//! Fallback chain for embedding generation.
//!
//! Providers are tried in order. When a later provider serves a request
//! because an earlier one was unavailable or failed, a `DegradationEvent`
//! is recorded.

use std::sync::Mutex;

use kb_core::constants::COMPONENT_EMBEDDINGS;
use kb_core::errors::{EmbeddingError, KbResult};
use kb_core::models::DegradationEvent;
use kb_core::traits::IEmbeddingProvider;
use tracing::warn;

/// Ordered provider fallback chain. Shareable across threads.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed with the first provider that succeeds. Returns the vector and
    /// the serving provider's name.
    pub fn embed(&self, text: &str) -> KbResult<(Vec<f32>, &str)> {
        self.run(|p| p.embed(text), "embed")
    }

    /// Batch variant of [`Self::embed`]; one provider serves the whole batch.
    pub fn embed_batch(&self, texts: &[String]) -> KbResult<(Vec<Vec<f32>>, &str)> {
        self.run(|p| p.embed_batch(texts), "batch embed")
    }

    fn run<T>(
        &self,
        op: impl Fn(&dyn IEmbeddingProvider) -> KbResult<T>,
        what: &str,
    ) -> KbResult<(T, &str)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match op(provider.as_ref()) {
                Ok(value) => {
                    if i > 0 {
                        self.record_fallback(provider.name());
                    }
                    return Ok((value, provider.name()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "{what} failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    fn record_fallback(&self, fallback: &str) {
        let primary = self.chain.first().map(|p| p.name()).unwrap_or("unknown");
        let event = DegradationEvent::new(
            COMPONENT_EMBEDDINGS,
            format!("{primary} unavailable"),
            fallback,
        );
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// The first available provider.
    pub fn active_provider(&self) -> Option<&dyn IEmbeddingProvider> {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.as_ref())
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.active_provider().map(|p| p.name()).unwrap_or("none")
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
