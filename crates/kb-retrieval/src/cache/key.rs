//! Deterministic cache keys.

use kb_core::models::{Category, SearchRequest};

use crate::normalization::text::normalize;

/// What a cache slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Result,
    Context,
}

impl PayloadKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Result => "result",
            Self::Context => "context",
        }
    }
}

/// blake3 over the payload kind, normalized query, intent name, category
/// and the result-shaping parameters.
pub fn cache_key(kind: PayloadKind, request: &SearchRequest) -> String {
    let intent = request.intent.as_ref().map(|i| i.name.as_str()).unwrap_or("");
    let category = request.category.map(Category::as_str).unwrap_or("");

    let query = normalize(&request.query);
    let max_results = request.max_results.to_string();
    let min_relevance = request.min_relevance.to_bits().to_string();

    let mut hasher = blake3::Hasher::new();
    for part in [
        kind.as_str(),
        query.as_str(),
        intent,
        category,
        max_results.as_str(),
        min_relevance.as_str(),
    ] {
        hasher.update(part.as_bytes());
        hasher.update(&[0x1f]);
    }
    hasher.finalize().to_hex().to_string()
}
