use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Category, Intent, ScoredEntry};

/// How a result set was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    FullText,
    SubstringFallback,
    Fuzzy,
    Intent,
    MultiStrategy,
    Hybrid,
    None,
}

impl SearchMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullText => "full_text",
            Self::SubstringFallback => "substring_fallback",
            Self::Fuzzy => "fuzzy",
            Self::Intent => "intent",
            Self::MultiStrategy => "multi_strategy",
            Self::Hybrid => "hybrid",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A knowledge search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub min_relevance: f64,
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Requested category; matching entries earn the category bonus.
    #[serde(default)]
    pub category: Option<Category>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, max_results: usize, min_relevance: f64) -> Self {
        Self {
            query: query.into(),
            max_results,
            min_relevance,
            intent: None,
            category: None,
        }
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// Ranked search outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entries: Vec<ScoredEntry>,
    /// Entries that passed the relevance filter before truncation.
    pub total_found: usize,
    pub method: SearchMethod,
    pub processing_time_ms: u64,
}

impl SearchResult {
    pub fn empty(method: SearchMethod, processing_time_ms: u64) -> Self {
        Self {
            entries: Vec::new(),
            total_found: 0,
            method,
            processing_time_ms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
