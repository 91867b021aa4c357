use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ConfigurationError, KbResult};

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Weight of the keyword (lexical) strategy in the weighted merge.
    pub keyword_weight: f64,
    /// Weight of the fuzzy strategy in the weighted merge.
    pub fuzzy_weight: f64,
    /// Weight of the intent strategy in the weighted merge.
    pub intent_weight: f64,
    /// Minimum merged score for an entry to be returned.
    pub min_relevance: f64,
    /// Default number of entries returned by `search`.
    pub max_results: usize,
    /// Minimum fuzzy score for an entry to contribute.
    pub fuzzy_threshold: f64,
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Over-fetch factor applied to each strategy before fusion.
    pub candidate_multiplier: usize,
    /// Default entries included in a formatted context.
    pub context_max_entries: usize,
    /// Content characters kept per entry in a formatted context.
    pub context_content_chars: usize,
    /// Intents below this confidence are ignored.
    pub min_intent_confidence: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
            fuzzy_weight: defaults::DEFAULT_FUZZY_WEIGHT,
            intent_weight: defaults::DEFAULT_INTENT_WEIGHT,
            min_relevance: defaults::DEFAULT_MIN_RELEVANCE,
            max_results: defaults::DEFAULT_MAX_RESULTS,
            fuzzy_threshold: defaults::DEFAULT_FUZZY_THRESHOLD,
            rrf_k: defaults::DEFAULT_RRF_K,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            context_max_entries: defaults::DEFAULT_CONTEXT_MAX_ENTRIES,
            context_content_chars: defaults::DEFAULT_CONTEXT_CONTENT_CHARS,
            min_intent_confidence: defaults::DEFAULT_MIN_INTENT_CONFIDENCE,
        }
    }
}

impl RetrievalConfig {
    /// Reject weights and thresholds that would make scoring meaningless.
    pub fn validate(&self) -> KbResult<()> {
        let checks = [
            ("keyword_weight", self.keyword_weight),
            ("fuzzy_weight", self.fuzzy_weight),
            ("intent_weight", self.intent_weight),
            ("min_relevance", self.min_relevance),
            ("fuzzy_threshold", self.fuzzy_threshold),
            ("min_intent_confidence", self.min_intent_confidence),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    name: name.to_string(),
                    value,
                }
                .into());
            }
        }
        Ok(())
    }
}
