//! Property tests: cosine similarity, RRF monotonicity, weighted merge
//! invariants, lexical recall on titles.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use kb_core::models::{Category, KnowledgeEntry, MatchReason, ScoredEntry, Strategy as Source};
use kb_core::traits::IKnowledgeStorage;
use kb_retrieval::lexical::LexicalIndex;
use kb_retrieval::normalization::{NormalizationEngine, StopWords};
use kb_retrieval::ranking::{merge, rrf_contribution, StrategyWeights};
use kb_retrieval::vector::cosine_similarity;
use kb_storage::StorageEngine;

fn nonzero_vector(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, len)
        .prop_filter("non-zero", |v| v.iter().any(|x| x.abs() > 1e-3))
}

fn scored_list() -> impl Strategy<Value = Vec<(i64, f64)>> {
    prop::collection::vec((1i64..25, 0.0f64..1.0), 0..12)
}

fn to_entries(raw: &[(i64, f64)], reason: MatchReason) -> Vec<ScoredEntry> {
    raw.iter()
        .map(|(id, score)| {
            let entry = KnowledgeEntry::new(Category::General, format!("e{id}"), "c").with_id(*id);
            ScoredEntry::new(entry, *score, reason.clone())
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_cosine_self_is_one(v in nonzero_vector(16)) {
        let sim = cosine_similarity(&v, &v).unwrap();
        prop_assert!((sim - 1.0).abs() < 1e-5, "self similarity {}", sim);
    }

    #[test]
    fn prop_cosine_symmetric(a in nonzero_vector(8), b in nonzero_vector(8)) {
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!((-1.0 - 1e-6..=1.0 + 1e-6).contains(&ab));
    }

    #[test]
    fn prop_rrf_decreases_with_rank(
        k in 1u32..200,
        rank in 0usize..500,
        sim in prop::option::of(0.0f64..1.0),
    ) {
        prop_assert!(rrf_contribution(k, rank, sim) > rrf_contribution(k, rank + 1, sim));
    }

    #[test]
    fn prop_merge_sorted_unique_above_threshold(
        keyword in scored_list(),
        fuzzy in scored_list(),
        intent in scored_list(),
        min_relevance in 0.0f64..0.6,
    ) {
        let lists = vec![
            (Source::Keyword, to_entries(&keyword, MatchReason::FullText)),
            (Source::Fuzzy, to_entries(&fuzzy, MatchReason::Fuzzy)),
            (
                Source::Intent,
                to_entries(
                    &intent,
                    MatchReason::Intent { intent: "faq".to_string(), category: Category::General },
                ),
            ),
        ];
        let merged = merge(&lists, &StrategyWeights::default(), min_relevance);

        let mut seen = HashSet::new();
        for e in &merged {
            prop_assert!(seen.insert(e.id()), "duplicate id {}", e.id());
            prop_assert!(e.relevance_score >= min_relevance);
        }
        prop_assert!(merged.windows(2).all(|w| w[0].relevance_score >= w[1].relevance_score));
    }

    #[test]
    fn prop_title_keyword_is_recalled(
        word in "[a-z]{4,12}",
        others in prop::collection::vec("[a-z]{4,12}", 1..6),
    ) {
        prop_assume!(!StopWords::default().contains(&word));
        let storage = StorageEngine::open_in_memory().unwrap();
        let target = storage
            .create(&KnowledgeEntry::new(
                Category::General,
                format!("Le {word} du jour"),
                "contenu",
            ))
            .unwrap();
        for other in &others {
            storage
                .create(&KnowledgeEntry::new(Category::Faq, other.clone(), "autre contenu"))
                .unwrap();
        }

        let normalizer = NormalizationEngine::default();
        let index = LexicalIndex::new(Arc::new(storage));
        let outcome = index.search(&normalizer.analyze(&word), 50).unwrap();
        prop_assert!(outcome.entries.iter().any(|e| e.id() == target));
    }
}
