use serde::{Deserialize, Serialize};

use super::ScoredEntry;

/// Prompt-ready context built from a search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattedContext {
    pub formatted_context: String,
    pub relevant_entries: Vec<ScoredEntry>,
}

impl FormattedContext {
    pub fn is_empty(&self) -> bool {
        self.relevant_entries.is_empty()
    }
}
