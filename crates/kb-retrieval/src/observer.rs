//! Shared metrics and degradation sink for the pipeline and the engine.

use std::sync::Mutex;

use kb_core::models::DegradationEvent;
use kb_observability::{DegradationTracker, MetricsCollector};

#[derive(Default)]
pub(crate) struct Observer {
    metrics: Mutex<MetricsCollector>,
    degradations: Mutex<DegradationTracker>,
}

impl Observer {
    pub(crate) fn degraded(&self, event: DegradationEvent) {
        if let Ok(mut m) = self.metrics.lock() {
            m.retrieval.record_degradation(&event.component);
        }
        if let Ok(mut t) = self.degradations.lock() {
            t.record(event);
        }
    }

    /// A component answered normally; close its open degradations.
    pub(crate) fn recovered(&self, component: &str) {
        if let Ok(mut t) = self.degradations.lock() {
            t.mark_recovered(component);
        }
    }

    /// Degradations not yet followed by a normal answer.
    pub(crate) fn active_degradations(&self) -> Vec<DegradationEvent> {
        self.degradations
            .lock()
            .map(|t| {
                t.active_degradations()
                    .into_iter()
                    .map(|tracked| tracked.event.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn recent_degradations(&self, component: &str, window_secs: i64) -> usize {
        self.degradations
            .lock()
            .map(|t| t.count_recent(component, window_secs))
            .unwrap_or(0)
    }

    pub(crate) fn with_metrics(&self, f: impl FnOnce(&mut MetricsCollector)) {
        if let Ok(mut m) = self.metrics.lock() {
            f(&mut m);
        }
    }

    pub(crate) fn metrics_snapshot(&self) -> MetricsCollector {
        self.metrics.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub(crate) fn drain_degradations(&self) -> Vec<DegradationEvent> {
        self.degradations
            .lock()
            .map(|mut t| t.drain())
            .unwrap_or_default()
    }
}
