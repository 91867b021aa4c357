use serde::{Deserialize, Serialize};

/// Stored embedding of one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingVector {
    pub entry_id: i64,
    pub values: Vec<f32>,
    pub model: String,
    /// blake3 of the embedded text at the time of embedding.
    pub content_hash: String,
}

impl EmbeddingVector {
    pub fn dimensions(&self) -> usize {
        self.values.len()
    }
}
