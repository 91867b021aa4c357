//! Substring fallback used when the full-text index yields nothing.
//!
//! Matching runs over normalized fields so accents and punctuation never
//! block a hit. A hit in an earlier field outranks one in a later field:
//! title, then keywords, then category, then content.

use kb_core::models::{KnowledgeEntry, MatchReason, ScoredEntry};

use crate::normalization::text::normalize;

/// Score given to a hit in each field, in priority order.
const FIELD_SCORES: [f64; 4] = [1.0, 0.8, 0.6, 0.4];

struct NormalizedFields {
    fields: [String; 4],
}

impl NormalizedFields {
    fn of(entry: &KnowledgeEntry) -> Self {
        Self {
            fields: [
                normalize(&entry.title),
                normalize(&entry.keywords_text()),
                normalize(entry.category.as_str()),
                normalize(&entry.content),
            ],
        }
    }

    /// Index of the highest-priority field containing any of `patterns`.
    fn best_field(&self, patterns: &[&str]) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| patterns.iter().any(|p| !p.is_empty() && field.contains(p)))
    }
}

fn rank(active: &[KnowledgeEntry], patterns: &[&str], reason: MatchReason) -> Vec<ScoredEntry> {
    let mut hits: Vec<(usize, &KnowledgeEntry)> = active
        .iter()
        .filter(|e| e.is_active)
        .filter_map(|e| NormalizedFields::of(e).best_field(patterns).map(|f| (f, e)))
        .collect();
    hits.sort_by_key(|(field, entry)| (*field, entry.id));
    hits.into_iter()
        .map(|(field, entry)| ScoredEntry::new(entry.clone(), FIELD_SCORES[field], reason.clone()))
        .collect()
}

/// Entries containing the whole normalized phrase.
pub fn phrase_matches(active: &[KnowledgeEntry], phrase: &str) -> Vec<ScoredEntry> {
    if phrase.is_empty() {
        return Vec::new();
    }
    rank(active, &[phrase], MatchReason::PhraseFallback)
}

/// Try each `(keyword, patterns)` group in order and return the hits of the
/// first group that matches anything. A group's patterns are OR-combined.
pub fn first_keyword_matches(
    active: &[KnowledgeEntry],
    groups: &[(String, Vec<String>)],
) -> Vec<ScoredEntry> {
    for (keyword, patterns) in groups {
        let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
        let hits = rank(
            active,
            &patterns,
            MatchReason::KeywordFallback {
                keyword: keyword.clone(),
            },
        );
        if !hits.is_empty() {
            return hits;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kb_core::models::Category;

    fn entries() -> Vec<KnowledgeEntry> {
        vec![
            KnowledgeEntry::new(Category::Contact, "Service client", "Appelez notre centre d'appel.")
                .with_id(1)
                .with_keywords(["téléphone"]),
            KnowledgeEntry::new(Category::Claims, "Déclaration", "Le service sinistres répond vite.")
                .with_id(2),
            KnowledgeEntry::new(Category::Payment, "Téléphone et paiement", "Payer par mobile.")
                .with_id(3),
            KnowledgeEntry::new(Category::Payment, "Service inactif", "").with_id(4).inactive(),
        ]
    }

    #[test]
    fn phrase_ranks_by_field_priority() {
        let hits = phrase_matches(&entries(), "telephone");
        let ids: Vec<i64> = hits.iter().map(|h| h.id()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(hits[0].relevance_score, 1.0);
        assert_eq!(hits[1].relevance_score, 0.8);
        assert_eq!(hits[0].reason, MatchReason::PhraseFallback);
    }

    #[test]
    fn inactive_entries_never_match() {
        let hits = phrase_matches(&entries(), "service");
        assert!(hits.iter().all(|h| h.id() != 4));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn category_field_matches() {
        let hits = phrase_matches(&entries(), "claims");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].relevance_score, 0.6);
    }

    #[test]
    fn stops_at_first_matching_keyword() {
        let groups = vec![
            ("zzz".to_string(), vec!["zzz".to_string()]),
            ("appel".to_string(), vec!["appel".to_string()]),
            ("mobile".to_string(), vec!["mobile".to_string()]),
        ];
        let hits = first_keyword_matches(&entries(), &groups);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), 1);
        assert_eq!(
            hits[0].reason,
            MatchReason::KeywordFallback {
                keyword: "appel".into()
            }
        );
    }

    #[test]
    fn group_patterns_are_or_combined() {
        let groups = vec![(
            "portable".to_string(),
            vec!["portable".to_string(), "mobile".to_string()],
        )];
        let hits = first_keyword_matches(&entries(), &groups);
        assert_eq!(hits[0].id(), 3);
    }

    #[test]
    fn empty_phrase_is_empty() {
        assert!(phrase_matches(&entries(), "").is_empty());
    }
}
