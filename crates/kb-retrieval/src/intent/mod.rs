//! IntentWeightedSearch: category-biased retrieval driven by an external
//! intent label.

pub mod category_map;

use std::sync::Arc;

use kb_core::models::{Intent, MatchReason, QueryAnalysis, ScoredEntry};
use kb_core::traits::IKnowledgeStorage;
use tracing::{debug, warn};

use crate::lexical::matched_keywords;
use crate::ranking::score_entry;

pub use category_map::IntentCategoryMap;

pub struct IntentWeightedSearch {
    storage: Arc<dyn IKnowledgeStorage>,
    map: Arc<IntentCategoryMap>,
    min_confidence: f64,
}

impl IntentWeightedSearch {
    pub fn new(
        storage: Arc<dyn IKnowledgeStorage>,
        map: Arc<IntentCategoryMap>,
        min_confidence: f64,
    ) -> Self {
        Self {
            storage,
            map,
            min_confidence,
        }
    }

    /// Score the active entries of every category mapped from `intent`,
    /// with that category as the requested one, times the category weight.
    ///
    /// Absent, unmapped or low-confidence intents contribute nothing. A
    /// category that fails to load is skipped. Never errors.
    pub fn search(&self, analysis: &QueryAnalysis, intent: Option<&Intent>) -> Vec<ScoredEntry> {
        let Some(intent) = intent else {
            return Vec::new();
        };
        if intent.confidence < self.min_confidence {
            debug!(intent = %intent.name, confidence = intent.confidence, "intent below threshold");
            return Vec::new();
        }

        let mut hits: Vec<ScoredEntry> = Vec::new();
        for (category, weight) in self.map.categories(&intent.name) {
            let entries = match self.storage.read_entries_by_category(*category) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(category = %category, error = %e, "category read failed, skipping");
                    continue;
                }
            };
            for entry in entries {
                if !entry.is_active || hits.iter().any(|h| h.id() == entry.id) {
                    continue;
                }
                let score = score_entry(&entry, analysis, Some(*category), Some(intent)) * weight;
                if score <= 0.0 {
                    continue;
                }
                let matched = matched_keywords(&entry, &analysis.keywords);
                let reason = MatchReason::Intent {
                    intent: intent.name.clone(),
                    category: *category,
                };
                hits.push(ScoredEntry::new(entry, score, reason).with_matched(matched));
            }
        }

        hits.sort_by(|a, b| {
            b.relevance_score
                .total_cmp(&a.relevance_score)
                .then(a.id().cmp(&b.id()))
        });
        hits
    }
}
