//! Property tests: normalize idempotence, keyword extraction filters.

use proptest::prelude::*;

use kb_retrieval::normalization::{normalize, NormalizationEngine, StopWords};

proptest! {
    #[test]
    fn prop_normalize_idempotent(text in "[a-zA-Zàâäéèêëîïôöùûüç0-9 '?!.,-]{0,60}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn prop_keywords_skip_stopwords_and_short_tokens(
        text in "[a-zA-Zéèàç ']{0,80}"
    ) {
        let engine = NormalizationEngine::default();
        let stop = StopWords::default();
        for keyword in engine.extract_keywords(&text) {
            prop_assert!(keyword.chars().count() > 2, "short keyword {}", keyword);
            prop_assert!(!stop.contains(&keyword), "stop-word keyword {}", keyword);
        }
    }

    #[test]
    fn prop_index_query_bounded(words in prop::collection::vec("[a-z]{3,10}", 0..30)) {
        let engine = NormalizationEngine::default();
        let query = engine.build_index_query(&words.join(" "));
        let terms = if query.is_empty() { 0 } else { query.split(" OR ").count() };
        prop_assert!(terms <= kb_core::constants::MAX_INDEX_TERMS);
    }
}

#[test]
fn golden_normalization_cases() {
    let engine = NormalizationEngine::default();
    for case in test_fixtures::normalization_cases() {
        assert_eq!(engine.normalize(&case.input), case.normalized, "input {:?}", case.input);
        assert_eq!(engine.extract_keywords(&case.input), case.keywords, "input {:?}", case.input);
    }
}
