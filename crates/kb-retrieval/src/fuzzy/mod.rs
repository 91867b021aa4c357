//! FuzzyMatcher: edit-distance approximate scoring for when exact terms
//! miss (typos, inflections the stemmer does not cover).

pub mod levenshtein;

use kb_core::models::{KnowledgeEntry, MatchReason, ScoredEntry};
use rayon::prelude::*;

use crate::lexical::matched_keywords;
use crate::normalization::text::normalize;

pub use levenshtein::{levenshtein, best_window_similarity};

pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Length-weighted mean of each keyword's best window similarity against
    /// the entry's normalized title, content and keywords. In [0, 1].
    pub fn fuzzy_score(&self, keywords: &[String], entry: &KnowledgeEntry) -> f64 {
        let text = normalize(&format!(
            "{} {} {}",
            entry.title,
            entry.content,
            entry.keywords_text()
        ));
        score_against(keywords, &text)
    }

    /// Score every active entry in parallel and keep those at or above the
    /// threshold, best first (ties by ascending id).
    pub fn search(&self, keywords: &[String], entries: &[KnowledgeEntry]) -> Vec<ScoredEntry> {
        if keywords.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<ScoredEntry> = entries
            .par_iter()
            .filter(|e| e.is_active)
            .filter_map(|entry| {
                let score = self.fuzzy_score(keywords, entry);
                (score >= self.threshold).then(|| {
                    let matched = matched_keywords(entry, keywords);
                    ScoredEntry::new(entry.clone(), score, MatchReason::Fuzzy).with_matched(matched)
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            b.relevance_score
                .total_cmp(&a.relevance_score)
                .then(a.id().cmp(&b.id()))
        });
        hits
    }
}

fn score_against(keywords: &[String], text: &str) -> f64 {
    let mut weighted = 0.0;
    let mut total_len = 0usize;
    for keyword in keywords {
        let len = keyword.chars().count();
        if len == 0 {
            continue;
        }
        weighted += best_window_similarity(keyword, text) * len as f64;
        total_len += len;
    }
    if total_len == 0 {
        return 0.0;
    }
    weighted / total_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::models::Category;

    fn entry(id: i64, title: &str, content: &str) -> KnowledgeEntry {
        KnowledgeEntry::new(Category::Products, title, content).with_id(id)
    }

    #[test]
    fn typo_still_scores_high() {
        let m = FuzzyMatcher::new(0.7);
        let e = entry(1, "Assurance automobile", "Couverture complète.");
        let score = m.fuzzy_score(&["assurence".to_string()], &e);
        assert!(score >= 0.7, "score was {score}");
        assert!(score < 1.0);
    }

    #[test]
    fn literal_containment_is_one() {
        let m = FuzzyMatcher::new(0.7);
        let e = entry(1, "Modes de paiement", "Virement ou prélèvement.");
        assert_eq!(m.fuzzy_score(&["paiement".to_string()], &e), 1.0);
    }

    #[test]
    fn score_is_length_weighted() {
        let m = FuzzyMatcher::new(0.0);
        let e = entry(1, "abcdef", "");
        // "abcdef" matches fully (6), "zzzz" shares nothing (4).
        let score = m.fuzzy_score(&["abcdef".to_string(), "zzzz".to_string()], &e);
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn search_filters_by_threshold_and_sorts() {
        let m = FuzzyMatcher::new(0.7);
        let entries = vec![
            entry(1, "Souscription en ligne", ""),
            entry(2, "Modes de paiement", ""),
            entry(3, "Souscription agence", "").inactive(),
            entry(4, "La souscripton", ""),
        ];
        let hits = m.search(&["souscription".to_string()], &entries);
        let ids: Vec<i64> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(hits.iter().all(|h| h.relevance_score >= 0.7));
        assert!(hits.iter().all(|h| h.reason == MatchReason::Fuzzy));
    }

    #[test]
    fn no_keywords_no_hits() {
        let m = FuzzyMatcher::new(0.7);
        assert!(m.search(&[], &[entry(1, "x", "y")]).is_empty());
    }
}
