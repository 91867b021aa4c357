//! Structured log events for key engine operations.

/// Log a completed search.
pub fn search_completed(method: &str, total_found: usize, processing_time_ms: u64) {
    tracing::info!(
        event = "search_completed",
        method = %method,
        total_found,
        processing_time_ms,
        "search completed"
    );
}

/// Log a strategy that failed and was excluded from the ranking.
pub fn strategy_failed(strategy: &str, error: &str) {
    tracing::warn!(
        event = "strategy_failed",
        strategy = %strategy,
        error = %error,
        "strategy failed, excluded from ranking"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a component answering normally again.
pub fn degradation_recovered(component: &str, events: usize) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        events,
        "component recovered"
    );
}

/// Log bulk precompute completion.
pub fn precompute_completed(embedded: usize, skipped: usize, elapsed_ms: u64) {
    tracing::info!(
        event = "precompute_completed",
        embedded,
        skipped,
        elapsed_ms,
        "embedding precompute completed"
    );
}

/// Log a result-cache flush.
pub fn cache_cleared(reason: &str) {
    tracing::debug!(event = "cache_cleared", reason = %reason, "result cache cleared");
}
