//! Entry CRUD, bulk insert, active filtering and embedding persistence.

use kb_core::errors::{KbError, StorageError};
use kb_core::models::{Category, EmbeddingVector, KnowledgeEntry};
use kb_core::traits::IKnowledgeStorage;
use kb_storage::StorageEngine;

fn seeded() -> StorageEngine {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.create_bulk(&test_fixtures::knowledge_base()).unwrap();
    engine
}

#[test]
fn insert_get_roundtrip_preserves_fields() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut entry = KnowledgeEntry::new(Category::Claims, "Déclarer un sinistre", "Sous 5 jours.")
        .with_keywords(["sinistre", "constat", "sinistre"])
        .with_tags(["auto"])
        .with_priority(7);
    entry
        .metadata
        .insert("source".into(), serde_json::json!("brochure"));

    let id = engine.create(&entry).unwrap();
    let got = engine.get(id).unwrap().unwrap();

    assert_eq!(got.id, id);
    assert_eq!(got.category, Category::Claims);
    assert_eq!(got.title, entry.title);
    // Keyword order and duplicates are preserved.
    assert_eq!(got.keywords, vec!["sinistre", "constat", "sinistre"]);
    assert_eq!(got.tags, vec!["auto"]);
    assert_eq!(got.priority, Some(7));
    assert!(got.is_active);
    assert_eq!(got.created_at, entry.created_at);
    assert_eq!(got.metadata["source"], "brochure");
}

#[test]
fn get_missing_returns_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.get(999).unwrap().is_none());
}

#[test]
fn update_and_delete_missing_entry_fail() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let ghost = KnowledgeEntry::new(Category::Faq, "x", "y").with_id(77);
    assert!(matches!(
        engine.update(&ghost),
        Err(KbError::EntryNotFound { id: 77 })
    ));
    assert!(matches!(
        engine.delete(77),
        Err(KbError::EntryNotFound { id: 77 })
    ));
}

#[test]
fn read_active_excludes_inactive() {
    let engine = seeded();
    let active = engine.read_active_entries().unwrap();
    assert_eq!(active.len(), 11);
    assert!(active.iter().all(|e| e.is_active));
    assert!(active.iter().all(|e| e.id != 11));
    assert_eq!(engine.count_active().unwrap(), 11);
}

#[test]
fn read_by_category_filters_and_orders_by_priority() {
    let engine = seeded();
    let products = engine.read_entries_by_category(Category::Products).unwrap();
    let ids: Vec<i64> = products.iter().map(|e| e.id).collect();
    // Entry 11 is inactive.
    assert_eq!(ids, vec![6, 12]);

    engine
        .update(&engine.get(12).unwrap().unwrap().with_priority(9))
        .unwrap();
    let products = engine.read_entries_by_category(Category::Products).unwrap();
    assert_eq!(products[0].id, 12);
}

#[test]
fn bulk_insert_is_all_or_nothing() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let entries = vec![
        KnowledgeEntry::new(Category::Faq, "a", "a").with_id(1),
        KnowledgeEntry::new(Category::Faq, "b", "b").with_id(1),
    ];
    assert!(engine.create_bulk(&entries).is_err());
    assert_eq!(engine.count_active().unwrap(), 0);
}

#[test]
fn embedding_store_replace_load_delete() {
    let engine = seeded();
    let vector = |values: Vec<f32>| EmbeddingVector {
        entry_id: 1,
        values,
        model: "tfidf".into(),
        content_hash: "h".into(),
    };

    engine.store_embedding(&vector(vec![0.6, 0.8])).unwrap();
    engine.store_embedding(&vector(vec![1.0, 0.0])).unwrap();

    let loaded = engine.load_embeddings("tfidf").unwrap();
    assert_eq!(loaded.len(), 1, "one row per entry");
    assert_eq!(loaded[0].values, vec![1.0, 0.0]);
    assert!(engine.load_embeddings("other-model").unwrap().is_empty());

    engine.delete_embedding(1).unwrap();
    assert!(engine.load_embeddings("tfidf").unwrap().is_empty());
}

#[test]
fn deleting_entry_cascades_to_embedding() {
    let engine = seeded();
    engine
        .store_embedding(&EmbeddingVector {
            entry_id: 2,
            values: vec![1.0, 2.0, 3.0],
            model: "tfidf".into(),
            content_hash: "h".into(),
        })
        .unwrap();
    engine.delete(2).unwrap();
    assert!(engine.load_embeddings("tfidf").unwrap().is_empty());
}

#[test]
fn inactive_entry_embeddings_are_not_loaded() {
    let engine = seeded();
    engine
        .store_embedding(&EmbeddingVector {
            entry_id: 11,
            values: vec![1.0],
            model: "tfidf".into(),
            content_hash: "h".into(),
        })
        .unwrap();
    assert!(engine.load_embeddings("tfidf").unwrap().is_empty());
}

#[test]
fn storage_errors_are_index_unavailable() {
    let engine = seeded();
    // Unbalanced quote is a MATCH syntax error.
    let err = engine.search_fulltext("\"takaful", 5).unwrap_err();
    assert!(matches!(
        err,
        KbError::StorageError(StorageError::IndexUnavailable { .. })
    ));
    assert!(err.is_index_unavailable());
}
