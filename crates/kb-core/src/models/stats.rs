use serde::{Deserialize, Serialize};

/// Result-cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub hit_rate: f64,
}

/// Vector index status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorStats {
    pub enabled: bool,
    pub vectors: usize,
    pub dimensions: usize,
    pub model: String,
    pub active_entries: usize,
    /// vectors / active_entries, 0 when there are no active entries.
    pub coverage: f64,
    pub last_precompute_ms: Option<u64>,
    /// Entries skipped by the last precompute (invalid id, inactive, failed).
    pub skipped: usize,
}
