use kb_core::constants::{COMPONENT_EMBEDDINGS, COMPONENT_LEXICAL};
use kb_core::models::DegradationEvent;
use kb_observability::degradation::{DegradationTracker, RecoveryStatus};
use kb_observability::metrics::MetricsCollector;
use kb_observability::tracing_setup::{self, spans::names};

#[test]
fn tracker_records_and_recovers() {
    let mut tracker = DegradationTracker::new();
    tracker.record(DegradationEvent::new(
        COMPONENT_LEXICAL,
        "fts5 syntax error",
        "substring_fallback",
    ));
    tracker.record(DegradationEvent::new(
        COMPONENT_EMBEDDINGS,
        "ollama unreachable",
        "tfidf",
    ));
    assert_eq!(tracker.active_degradations().len(), 2);
    assert_eq!(tracker.count_recent(COMPONENT_LEXICAL, 60), 1);

    tracker.mark_recovered(COMPONENT_LEXICAL);
    let active = tracker.active_degradations();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].event.component, COMPONENT_EMBEDDINGS);
    assert_eq!(tracker.events()[0].recovery_status, RecoveryStatus::Recovered);
    assert!(tracker.events()[0].recovered_at.is_some());
}

#[test]
fn recovery_clears_every_active_event_of_the_component() {
    let mut tracker = DegradationTracker::new();
    for _ in 0..3 {
        tracker.record(DegradationEvent::new(COMPONENT_LEXICAL, "fts5 locked", "substring_fallback"));
    }
    assert_eq!(tracker.mark_recovered(COMPONENT_LEXICAL), 3);
    assert!(tracker.active_degradations().is_empty());
    assert_eq!(tracker.mark_recovered(COMPONENT_LEXICAL), 0);
    // History stays until drained.
    assert_eq!(tracker.count_recent(COMPONENT_LEXICAL, 60), 3);
}

#[test]
fn tracker_drain_empties() {
    let mut tracker = DegradationTracker::new();
    tracker.record(DegradationEvent::new("vector_index", "disabled", "none"));
    let drained = tracker.drain();
    assert_eq!(drained.len(), 1);
    assert!(tracker.events().is_empty());
}

#[test]
fn collector_serializes_and_resets() {
    let mut metrics = MetricsCollector::new();
    metrics.retrieval.record_query("hybrid", 2, 5);
    metrics.retrieval.record_degradation(COMPONENT_LEXICAL);
    metrics.embedding.record_lookup(true);
    metrics.embedding.record_lookup(false);
    metrics.embedding.record_precompute(10, 1, 42);

    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["retrieval"]["total_queries"], 1);
    assert_eq!(json["embedding"]["last_precompute_ms"], 42);
    assert!((metrics.embedding.cache_hit_rate() - 0.5).abs() < 1e-9);

    metrics.reset();
    assert_eq!(metrics.retrieval.total_queries, 0);
}

#[test]
fn span_macros_use_named_spans() {
    let _ = kb_observability::search_span!("takaful", Some("contact_info"));
    let _ = kb_observability::hybrid_span!("takaful", 3usize);
    let _ = kb_observability::precompute_span!(12usize);
    assert_eq!(names::SEARCH, "kb.search");
}

#[test]
fn second_tracing_init_is_rejected_without_panic() {
    let _ = tracing_setup::init_tracing_with_filter("warn");
    assert!(!tracing_setup::init_tracing_with_filter("warn"));
}
