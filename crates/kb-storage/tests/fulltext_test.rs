//! FTS5 projection: ranking contract, active filter, trigger sync.

use kb_core::models::{Category, KnowledgeEntry};
use kb_core::traits::IKnowledgeStorage;
use kb_storage::StorageEngine;

fn ids(hits: &[(KnowledgeEntry, f64)]) -> Vec<i64> {
    hits.iter().map(|(e, _)| e.id).collect()
}

#[test]
fn title_match_finds_entry_with_positive_score() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .create(
            &KnowledgeEntry::new(
                Category::Takaful,
                "Takaful Définition",
                "Le takaful est une assurance islamique...",
            )
            .with_id(1)
            .with_keywords(["takaful", "définition"]),
        )
        .unwrap();

    let hits = engine.search_fulltext("\"takaful\"*", 10).unwrap();
    assert_eq!(ids(&hits), vec![1]);
    assert!(hits[0].1 > 0.0);
}

#[test]
fn diacritics_are_folded_by_the_tokenizer() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_bulk(&test_fixtures::knowledge_base()).unwrap();
    let hits = engine.search_fulltext("\"declarer\"*", 10).unwrap();
    assert_eq!(ids(&hits), vec![5]);
}

#[test]
fn title_outranks_content() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .create(&KnowledgeEntry::new(Category::General, "Notes", "parle du sinistre").with_id(1))
        .unwrap();
    engine
        .create(&KnowledgeEntry::new(Category::Claims, "Sinistre", "procédure").with_id(2))
        .unwrap();
    engine
        .create(&KnowledgeEntry::new(Category::Faq, "Autre", "rien").with_id(3))
        .unwrap();

    let hits = engine.search_fulltext("\"sinistre\"*", 10).unwrap();
    assert_eq!(ids(&hits), vec![2, 1]);
    assert!(hits[0].1 >= hits[1].1);
}

#[test]
fn more_distinct_terms_rank_higher() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .create(&KnowledgeEntry::new(Category::General, "assurance", "texte").with_id(1))
        .unwrap();
    engine
        .create(&KnowledgeEntry::new(Category::General, "assurance santé", "texte").with_id(2))
        .unwrap();
    engine
        .create(&KnowledgeEntry::new(Category::General, "voyage", "texte").with_id(3))
        .unwrap();
    engine
        .create(&KnowledgeEntry::new(Category::General, "agence", "texte").with_id(4))
        .unwrap();

    let hits = engine
        .search_fulltext("\"assurance\"* OR \"sante\"*", 10)
        .unwrap();
    assert_eq!(ids(&hits)[0], 2);
}

#[test]
fn inactive_entries_never_match() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_bulk(&test_fixtures::knowledge_base()).unwrap();
    let hits = engine.search_fulltext("\"habitation\"*", 10).unwrap();
    assert!(!ids(&hits).contains(&11));
    assert!(ids(&hits).contains(&3));
}

#[test]
fn index_follows_updates_and_deletes() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut entry = KnowledgeEntry::new(Category::Faq, "Ancien titre", "contenu").with_id(1);
    engine.create(&entry).unwrap();
    assert_eq!(ids(&engine.search_fulltext("\"ancien\"*", 5).unwrap()), vec![1]);

    entry.title = "Nouveau titre".into();
    engine.update(&entry).unwrap();
    assert!(engine.search_fulltext("\"ancien\"*", 5).unwrap().is_empty());
    assert_eq!(ids(&engine.search_fulltext("\"nouveau\"*", 5).unwrap()), vec![1]);

    entry.is_active = false;
    engine.update(&entry).unwrap();
    assert!(engine.search_fulltext("\"nouveau\"*", 5).unwrap().is_empty());

    entry.is_active = true;
    engine.update(&entry).unwrap();
    assert_eq!(engine.search_fulltext("\"nouveau\"*", 5).unwrap().len(), 1);

    engine.delete(1).unwrap();
    assert!(engine.search_fulltext("\"nouveau\"*", 5).unwrap().is_empty());
}

#[test]
fn keywords_column_is_searchable() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_bulk(&test_fixtures::knowledge_base()).unwrap();
    // "voiture" only appears in entry 6's keywords.
    assert_eq!(ids(&engine.search_fulltext("\"voiture\"*", 5).unwrap()), vec![6]);
}

#[test]
fn limit_is_respected_and_rebuild_keeps_results() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_bulk(&test_fixtures::knowledge_base()).unwrap();
    let hits = engine.search_fulltext("\"takaful\"*", 2).unwrap();
    assert_eq!(hits.len(), 2);

    engine.rebuild_fulltext_index().unwrap();
    assert_eq!(engine.search_fulltext("\"takaful\"*", 2).unwrap().len(), 2);
}
