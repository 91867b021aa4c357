// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "knowledge.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 2_000;

// --- Retrieval ---
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.4;
pub const DEFAULT_FUZZY_WEIGHT: f64 = 0.3;
pub const DEFAULT_INTENT_WEIGHT: f64 = 0.3;
pub const DEFAULT_MIN_RELEVANCE: f64 = 0.3;
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_CANDIDATE_MULTIPLIER: usize = 3;
pub const DEFAULT_CONTEXT_MAX_ENTRIES: usize = 3;
pub const DEFAULT_CONTEXT_CONTENT_CHARS: usize = 800;
pub const DEFAULT_MIN_INTENT_CONFIDENCE: f64 = 0.0;

// --- Cache ---
pub const DEFAULT_CACHE_ENABLED: bool = true;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1_000;

// --- Normalization ---
pub const DEFAULT_MAX_KEYWORDS: usize = 10;
pub const DEFAULT_MAX_INDEX_TERMS: usize = 10;
pub const DEFAULT_MAX_FALLBACK_PATTERNS: usize = 10;
pub const DEFAULT_MAX_SYNONYMS_PER_KEYWORD: usize = 3;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
