//! Queries per method, zero-result queries, degradations per component,
//! cumulative processing time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tracks retrieval effectiveness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    pub total_queries: u64,
    pub queries_by_method: HashMap<String, u64>,
    /// Queries where every strategy came back empty.
    pub zero_result_queries: u64,
    pub degradations_by_component: HashMap<String, u64>,
    pub total_processing_ms: u64,
    /// Queries answered from the result cache.
    pub cache_served: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one computed query.
    pub fn record_query(&mut self, method: &str, total_found: usize, processing_time_ms: u64) {
        self.total_queries += 1;
        *self.queries_by_method.entry(method.to_string()).or_default() += 1;
        if total_found == 0 {
            self.zero_result_queries += 1;
        }
        self.total_processing_ms += processing_time_ms;
    }

    pub fn record_cache_served(&mut self) {
        self.cache_served += 1;
    }

    pub fn record_degradation(&mut self, component: &str) {
        *self
            .degradations_by_component
            .entry(component.to_string())
            .or_default() += 1;
    }

    /// Mean processing time of computed queries.
    pub fn average_processing_ms(&self) -> f64 {
        if self.total_queries == 0 {
            return 0.0;
        }
        self.total_processing_ms as f64 / self.total_queries as f64
    }

    /// Fraction of computed queries that found nothing.
    pub fn zero_result_rate(&self) -> f64 {
        if self.total_queries == 0 {
            return 0.0;
        }
        self.zero_result_queries as f64 / self.total_queries as f64
    }
}
