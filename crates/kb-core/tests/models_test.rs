use kb_core::models::*;

#[test]
fn category_roundtrips_through_str() {
    for category in Category::ALL {
        let parsed: Category = category.as_str().parse().unwrap();
        assert_eq!(parsed, category);
    }
    assert!("insurance".parse::<Category>().is_err());
}

#[test]
fn category_serializes_snake_case() {
    let json = serde_json::to_string(&Category::TakafulServices).unwrap();
    assert_eq!(json, "\"takaful_services\"");
}

#[test]
fn entry_deserializes_with_defaults() {
    let json = r#"{
        "id": 7,
        "category": "contact",
        "title": "Contact ROI",
        "content": "Appelez-nous"
    }"#;
    let entry: KnowledgeEntry = serde_json::from_str(json).unwrap();
    assert_eq!(entry.id, 7);
    assert!(entry.is_active);
    assert!(entry.keywords.is_empty());
    assert!(entry.priority.is_none());
    assert!(entry.metadata.is_empty());
}

#[test]
fn entry_priority_is_clamped_and_boosts() {
    let entry = KnowledgeEntry::new(Category::Faq, "t", "c").with_priority(42);
    assert_eq!(entry.priority, Some(10));
    assert!((entry.priority_boost() - 2.0).abs() < 1e-12);

    let plain = KnowledgeEntry::new(Category::Faq, "t", "c");
    assert_eq!(plain.priority_boost(), 1.0);
}

#[test]
fn entry_embedding_text_and_hash() {
    let a = KnowledgeEntry::new(Category::Takaful, "Takaful", "Assurance islamique");
    assert_eq!(a.embedding_text(), "Takaful\nAssurance islamique");
    let b = a.clone().with_keywords(["takaful"]);
    // Keywords are not part of the embedded text.
    assert_eq!(a.content_hash(), b.content_hash());
    let c = KnowledgeEntry::new(Category::Takaful, "Takaful", "Autre contenu");
    assert_ne!(a.content_hash(), c.content_hash());
}

#[test]
fn metadata_is_open_json() {
    let mut entry = KnowledgeEntry::new(Category::General, "t", "c");
    entry
        .metadata
        .insert("source".into(), serde_json::json!({ "page": 3, "lang": "fr" }));
    let json = serde_json::to_string(&entry).unwrap();
    let back: KnowledgeEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back.metadata["source"]["page"], 3);
}

#[test]
fn match_reason_is_tagged() {
    let reason = MatchReason::Intent {
        intent: "contact_info".into(),
        category: Category::Contact,
    };
    let value = serde_json::to_value(&reason).unwrap();
    assert_eq!(value["kind"], "intent");
    assert_eq!(value["category"], "contact");
}

#[test]
fn search_result_empty() {
    let result = SearchResult::empty(SearchMethod::None, 3);
    assert!(result.is_empty());
    assert_eq!(result.total_found, 0);
    assert_eq!(result.method.to_string(), "none");
}

#[test]
fn search_request_builders() {
    let req = SearchRequest::new("contact", 5, 0.3)
        .with_intent(Intent::new("contact_info", 0.9).with_entity("city", "Tunis"))
        .with_category(Category::Contact);
    assert_eq!(req.category, Some(Category::Contact));
    assert_eq!(req.intent.as_ref().unwrap().entities["city"], "Tunis");
}
