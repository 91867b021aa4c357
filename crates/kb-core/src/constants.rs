/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard cap on terms sent to the lexical index in one query.
pub const MAX_INDEX_TERMS: usize = 10;

/// Hard cap on substring patterns tried by the fallback search.
pub const MAX_FALLBACK_PATTERNS: usize = 10;

/// Maximum batch size for bulk operations.
pub const MAX_BULK_BATCH_SIZE: usize = 1000;

/// Highest priority an entry may carry.
pub const MAX_PRIORITY: u8 = 10;

/// Component names used in degradation events and logs.
pub const COMPONENT_LEXICAL: &str = "lexical_index";
pub const COMPONENT_FUZZY: &str = "fuzzy_matcher";
pub const COMPONENT_INTENT: &str = "intent_search";
pub const COMPONENT_VECTOR: &str = "vector_index";
pub const COMPONENT_EMBEDDINGS: &str = "embeddings";
