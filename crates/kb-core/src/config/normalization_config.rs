use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Query normalization configuration.
///
/// `synonyms` and `extra_stop_words` are merged over the built-in
/// thesaurus and stop-word set; they never replace them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    pub max_keywords: usize,
    pub max_index_terms: usize,
    pub max_fallback_patterns: usize,
    pub max_synonyms_per_keyword: usize,
    pub extra_stop_words: Vec<String>,
    pub synonyms: BTreeMap<String, Vec<String>>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            max_keywords: defaults::DEFAULT_MAX_KEYWORDS,
            max_index_terms: defaults::DEFAULT_MAX_INDEX_TERMS,
            max_fallback_patterns: defaults::DEFAULT_MAX_FALLBACK_PATTERNS,
            max_synonyms_per_keyword: defaults::DEFAULT_MAX_SYNONYMS_PER_KEYWORD,
            extra_stop_words: Vec::new(),
            synonyms: BTreeMap::new(),
        }
    }
}
