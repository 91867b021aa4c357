//! Weighted merge of per-strategy scored lists.
//!
//! Each strategy's score is multiplied by its weight and summed per entry.
//! The sum is not clamped, so an entry found by several strategies may
//! exceed 1.0.

use std::collections::HashMap;

use kb_core::config::RetrievalConfig;
use kb_core::models::{MatchReason, ScoredEntry, Strategy};

/// Per-strategy weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyWeights {
    pub keyword: f64,
    pub fuzzy: f64,
    pub intent: f64,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

impl StrategyWeights {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            keyword: config.keyword_weight,
            fuzzy: config.fuzzy_weight,
            intent: config.intent_weight,
        }
    }

    pub fn weight(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Keyword => self.keyword,
            Strategy::Fuzzy => self.fuzzy,
            Strategy::Intent => self.intent,
            Strategy::Vector => 0.0,
        }
    }
}

struct Accumulator {
    scored: ScoredEntry,
    total: f64,
    strategies: Vec<Strategy>,
}

/// Merge `(strategy, entries)` lists. Output is sorted by merged score
/// descending (ties by ascending id), deduplicated by entry id, and only
/// holds entries scoring at least `min_relevance`.
pub fn merge(
    lists: &[(Strategy, Vec<ScoredEntry>)],
    weights: &StrategyWeights,
    min_relevance: f64,
) -> Vec<ScoredEntry> {
    let mut order: Vec<i64> = Vec::new();
    let mut acc: HashMap<i64, Accumulator> = HashMap::new();

    for (strategy, entries) in lists {
        let weight = weights.weight(*strategy);
        for scored in entries {
            let contribution = scored.relevance_score * weight;
            match acc.get_mut(&scored.id()) {
                Some(a) => {
                    a.total += contribution;
                    if !a.strategies.contains(strategy) {
                        a.strategies.push(*strategy);
                    }
                    for k in &scored.matched_keywords {
                        if !a.scored.matched_keywords.contains(k) {
                            a.scored.matched_keywords.push(k.clone());
                        }
                    }
                }
                None => {
                    order.push(scored.id());
                    acc.insert(
                        scored.id(),
                        Accumulator {
                            scored: scored.clone(),
                            total: contribution,
                            strategies: vec![*strategy],
                        },
                    );
                }
            }
        }
    }

    let mut merged: Vec<ScoredEntry> = order
        .into_iter()
        .filter_map(|id| acc.remove(&id))
        .filter(|a| a.total >= min_relevance)
        .map(|a| {
            let mut scored = a.scored;
            scored.relevance_score = a.total;
            if a.strategies.len() > 1 {
                scored.reason = MatchReason::Combined {
                    strategies: a.strategies,
                };
            }
            scored
        })
        .collect();

    merged.sort_by(|a, b| {
        b.relevance_score
            .total_cmp(&a.relevance_score)
            .then(a.id().cmp(&b.id()))
    });
    merged
}
