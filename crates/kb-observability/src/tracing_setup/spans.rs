//! Span definitions per operation: search, hybrid search, embedding, precompute.

/// Create a multi-strategy search span.
#[macro_export]
macro_rules! search_span {
    ($query:expr, $intent:expr) => {
        tracing::info_span!("kb.search", query = %$query, intent = ?$intent)
    };
}

/// Create a lexical + vector hybrid search span.
#[macro_export]
macro_rules! hybrid_span {
    ($query:expr, $top_k:expr) => {
        tracing::info_span!("kb.hybrid", query = %$query, top_k = $top_k)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimension:expr) => {
        tracing::info_span!("kb.embedding", provider = %$provider, dimension = $dimension)
    };
}

/// Create a bulk precompute span.
#[macro_export]
macro_rules! precompute_span {
    ($entry_count:expr) => {
        tracing::info_span!("kb.precompute", entry_count = $entry_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEARCH: &str = "kb.search";
    pub const HYBRID: &str = "kb.hybrid";
    pub const EMBEDDING: &str = "kb.embedding";
    pub const PRECOMPUTE: &str = "kb.precompute";
}
