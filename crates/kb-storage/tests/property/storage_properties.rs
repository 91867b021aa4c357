//! Property tests: insert→get roundtrip, lexical recall on titles.

use proptest::prelude::*;

use kb_core::models::{Category, KnowledgeEntry};
use kb_core::traits::IKnowledgeStorage;
use kb_storage::queries::embedding_ops::{bytes_to_f32_vec, f32_vec_to_bytes};
use kb_storage::StorageEngine;

proptest! {
    #[test]
    fn prop_insert_get_roundtrip(
        title in "[a-zA-Z0-9 ]{1,60}",
        keywords in prop::collection::vec("[a-z]{3,10}", 0..6),
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let entry = KnowledgeEntry::new(Category::General, title.clone(), "contenu")
            .with_keywords(keywords.clone());
        let id = engine.create(&entry).unwrap();
        let got = engine.get(id).unwrap().unwrap();
        prop_assert_eq!(got.title, title);
        prop_assert_eq!(got.keywords, keywords);
    }

    #[test]
    fn prop_title_word_is_recalled(
        word in "[a-z]{4,12}",
        filler in prop::collection::vec("[a-z]{4,12}", 0..5),
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let target = engine
            .create(&KnowledgeEntry::new(Category::Faq, format!("titre {word}"), "x"))
            .unwrap();
        for f in &filler {
            engine
                .create(&KnowledgeEntry::new(Category::Faq, f.clone(), "y"))
                .unwrap();
        }
        let hits = engine
            .search_fulltext(&format!("\"{word}\"*"), 50)
            .unwrap();
        prop_assert!(hits.iter().any(|(e, _)| e.id == target));
        prop_assert!(hits.iter().all(|(_, s)| *s > 0.0));
    }

    #[test]
    fn prop_embedding_bytes_roundtrip(values in prop::collection::vec(-1.0e6f32..1.0e6, 0..64)) {
        prop_assert_eq!(bytes_to_f32_vec(&f32_vec_to_bytes(&values)), values);
    }
}
