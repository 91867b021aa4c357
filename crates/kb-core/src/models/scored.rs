use serde::{Deserialize, Serialize};

use super::{Category, KnowledgeEntry};

/// Retrieval strategy that contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Keyword,
    Fuzzy,
    Intent,
    Vector,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Fuzzy => "fuzzy",
            Self::Intent => "intent",
            Self::Vector => "vector",
        }
    }
}

/// Which strategy or rule produced a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchReason {
    FullText,
    PhraseFallback,
    KeywordFallback { keyword: String },
    Fuzzy,
    Intent { intent: String, category: Category },
    Combined { strategies: Vec<Strategy> },
    Vector,
    RankFusion { sources: Vec<Strategy> },
}

/// An entry with its strategy-dependent relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub entry: KnowledgeEntry,
    pub relevance_score: f64,
    /// Query keywords found in the entry.
    pub matched_keywords: Vec<String>,
    pub reason: MatchReason,
}

impl ScoredEntry {
    pub fn new(entry: KnowledgeEntry, relevance_score: f64, reason: MatchReason) -> Self {
        Self {
            entry,
            relevance_score,
            matched_keywords: Vec::new(),
            reason,
        }
    }

    pub fn with_matched(mut self, matched_keywords: Vec<String>) -> Self {
        self.matched_keywords = matched_keywords;
        self
    }

    pub fn id(&self) -> i64 {
        self.entry.id
    }
}
