//! # kb-observability
//!
//! Tracing subscriber setup with span definitions, retrieval and embedding
//! metrics, and degradation event tracking.

pub mod degradation;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::DegradationTracker;
pub use metrics::{EmbeddingMetrics, MetricsCollector, RetrievalMetrics};
