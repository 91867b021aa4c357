pub mod category;
pub mod context;
pub mod degradation_event;
pub mod embedding;
pub mod entry;
pub mod intent;
pub mod query;
pub mod scored;
pub mod search;
pub mod stats;

pub use category::Category;
pub use context::FormattedContext;
pub use degradation_event::DegradationEvent;
pub use embedding::EmbeddingVector;
pub use entry::{KnowledgeEntry, Metadata};
pub use intent::Intent;
pub use query::{Language, QueryAnalysis};
pub use scored::{MatchReason, ScoredEntry, Strategy};
pub use search::{SearchMethod, SearchRequest, SearchResult};
pub use stats::{CacheStats, VectorStats};
