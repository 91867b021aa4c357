//! # kb-retrieval
//!
//! Hybrid knowledge retrieval over a French-language knowledge base.
//!
//! A query is normalized once, then scored by lexical (FTS5 with substring
//! fallback), fuzzy and intent-weighted strategies that are merged by
//! configured weights. The hybrid path fuses lexical and vector rankings with
//! reciprocal rank fusion. [`KnowledgeEngine`] ties everything together.

pub mod cache;
pub mod context;
pub mod engine;
pub mod fuzzy;
pub mod intent;
pub mod lexical;
pub mod normalization;
mod observer;
pub mod pipeline;
pub mod ranking;
pub mod vector;

pub use cache::{CachedSearcher, ResultCache};
pub use context::ContextFormatter;
pub use engine::KnowledgeEngine;
pub use fuzzy::FuzzyMatcher;
pub use intent::{IntentCategoryMap, IntentWeightedSearch};
pub use lexical::LexicalIndex;
pub use normalization::NormalizationEngine;
pub use pipeline::SearchPipeline;
pub use vector::VectorIndex;
