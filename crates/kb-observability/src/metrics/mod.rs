//! Metrics registry.

pub mod embedding_metrics;
pub mod retrieval_metrics;

pub use embedding_metrics::EmbeddingMetrics;
pub use retrieval_metrics::RetrievalMetrics;

/// Owns every metric collector.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsCollector {
    pub retrieval: RetrievalMetrics,
    pub embedding: EmbeddingMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
