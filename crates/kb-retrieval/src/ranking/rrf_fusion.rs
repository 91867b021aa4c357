//! Reciprocal Rank Fusion: score = Σ 1/(k + rank + 1), rank 0-based.
//!
//! Combines ranked lists without normalizing scores across methods. Terms
//! from a similarity-weighted list (the vector list) are multiplied by
//! `1 + similarity`.

use std::collections::HashMap;

use kb_core::models::{MatchReason, ScoredEntry, Strategy};

/// One ranked input list.
#[derive(Debug, Clone)]
pub struct RankedList {
    pub source: Strategy,
    /// Best first. For similarity-weighted lists `relevance_score` holds the
    /// similarity.
    pub entries: Vec<ScoredEntry>,
    pub similarity_weighted: bool,
}

impl RankedList {
    pub fn lexical(entries: Vec<ScoredEntry>) -> Self {
        Self {
            source: Strategy::Keyword,
            entries,
            similarity_weighted: false,
        }
    }

    pub fn vector(entries: Vec<ScoredEntry>) -> Self {
        Self {
            source: Strategy::Vector,
            entries,
            similarity_weighted: true,
        }
    }
}

/// Contribution of one list position.
pub fn rrf_contribution(k: u32, rank: usize, similarity: Option<f64>) -> f64 {
    let base = 1.0 / (f64::from(k) + rank as f64 + 1.0);
    match similarity {
        Some(sim) => base * (1.0 + sim),
        None => base,
    }
}

/// Fuse lists, sort descending and truncate to `top_k`. Ties keep
/// first-seen order across the lists as given.
pub fn fuse(lists: &[RankedList], k: u32, top_k: usize) -> Vec<ScoredEntry> {
    let mut order: Vec<i64> = Vec::new();
    let mut fused: HashMap<i64, (ScoredEntry, f64, Vec<Strategy>)> = HashMap::new();

    for list in lists {
        for (rank, scored) in list.entries.iter().enumerate() {
            let similarity = list.similarity_weighted.then_some(scored.relevance_score);
            let rrf = rrf_contribution(k, rank, similarity);
            let slot = fused.entry(scored.id()).or_insert_with(|| {
                order.push(scored.id());
                (scored.clone(), 0.0, Vec::new())
            });
            slot.1 += rrf;
            if !slot.2.contains(&list.source) {
                slot.2.push(list.source);
            }
            for kw in &scored.matched_keywords {
                if !slot.0.matched_keywords.contains(kw) {
                    slot.0.matched_keywords.push(kw.clone());
                }
            }
        }
    }

    let mut candidates: Vec<ScoredEntry> = order
        .into_iter()
        .filter_map(|id| fused.remove(&id))
        .map(|(mut scored, score, sources)| {
            scored.relevance_score = score;
            scored.reason = MatchReason::RankFusion { sources };
            scored
        })
        .collect();

    // Stable: equal scores stay in first-seen order.
    candidates.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    candidates.truncate(top_k);
    candidates
}
