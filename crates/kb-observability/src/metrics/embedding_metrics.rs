//! Query-embedding cache hits, precompute runs, provider usage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Embedding subsystem metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingMetrics {
    pub cache_hits: u64,
    pub total_lookups: u64,
    pub precompute_runs: u64,
    pub vectors_embedded: u64,
    pub embed_failures: u64,
    pub last_precompute_ms: Option<u64>,
    pub provider_usage: HashMap<String, u64>,
}

impl EmbeddingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&mut self, hit: bool) {
        self.total_lookups += 1;
        if hit {
            self.cache_hits += 1;
        }
    }

    pub fn record_provider(&mut self, provider: &str) {
        *self.provider_usage.entry(provider.to_string()).or_default() += 1;
    }

    pub fn record_precompute(&mut self, embedded: usize, failures: usize, elapsed_ms: u64) {
        self.precompute_runs += 1;
        self.vectors_embedded += embedded as u64;
        self.embed_failures += failures as u64;
        self.last_precompute_ms = Some(elapsed_ms);
    }

    pub fn cache_hit_rate(&self) -> f64 {
        if self.total_lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_lookups as f64
        }
    }
}
