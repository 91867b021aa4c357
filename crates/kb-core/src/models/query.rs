use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Language tag from the function-word heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    French,
    English,
    Arabic,
    Unknown,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::French => "fr",
            Self::English => "en",
            Self::Arabic => "ar",
            Self::Unknown => "unknown",
        }
    }
}

/// Everything derived from one query string. Built once, then read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub original: String,
    pub normalized: String,
    /// Stop-words removed, first-occurrence order.
    pub keywords: Vec<String>,
    /// `stems[i]` is the stem of `keywords[i]`.
    pub stems: Vec<String>,
    pub synonyms: BTreeSet<String>,
    /// keywords ∪ stems ∪ synonyms ∪ synonym stems.
    pub expanded_terms: BTreeSet<String>,
    pub language: Language,
    /// FTS5 MATCH expression; empty when there is nothing to search for.
    pub index_query: String,
    pub fallback_patterns: Vec<String>,
}

impl QueryAnalysis {
    /// True when cleanup left nothing searchable.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}
