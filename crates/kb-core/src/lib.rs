//! # kb-core
//!
//! Foundation crate for the knowledge retrieval engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::KbConfig;
pub use errors::{KbError, KbResult};
pub use models::{Category, Intent, KnowledgeEntry, ScoredEntry, SearchResult};
