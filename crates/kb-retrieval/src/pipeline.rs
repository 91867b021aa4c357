//! The pure multi-strategy search pipeline:
//! normalize → {lexical, fuzzy, intent} → weighted merge.
//!
//! Holds no mutable state of its own; the result cache wraps it from the
//! outside.

use std::sync::Arc;
use std::time::Instant;

use kb_core::config::RetrievalConfig;
use kb_core::constants::{COMPONENT_FUZZY, COMPONENT_LEXICAL};
use kb_core::errors::{KbError, KbResult};
use kb_core::models::{
    DegradationEvent, QueryAnalysis, ScoredEntry, SearchMethod, SearchRequest, SearchResult,
    Strategy,
};
use kb_core::traits::{IKnowledgeSearcher, IKnowledgeStorage};
use kb_observability::search_span;
use kb_observability::tracing_setup::events;
use tracing::debug;

use crate::fuzzy::FuzzyMatcher;
use crate::intent::{IntentCategoryMap, IntentWeightedSearch};
use crate::lexical::LexicalIndex;
use crate::normalization::NormalizationEngine;
use crate::observer::Observer;
use crate::ranking::{merge, score_entry, StrategyWeights};

/// Reject requests that can never produce a meaningful ranking.
pub(crate) fn validate_request(request: &SearchRequest) -> KbResult<()> {
    if request.max_results == 0 {
        return Err(KbError::invalid_input("max_results must be at least 1"));
    }
    if !request.min_relevance.is_finite() || request.min_relevance < 0.0 {
        return Err(KbError::invalid_input(format!(
            "min_relevance must be finite and non-negative, got {}",
            request.min_relevance
        )));
    }
    Ok(())
}

pub struct SearchPipeline {
    storage: Arc<dyn IKnowledgeStorage>,
    normalizer: Arc<NormalizationEngine>,
    lexical: LexicalIndex,
    fuzzy: FuzzyMatcher,
    intent: IntentWeightedSearch,
    weights: StrategyWeights,
    candidate_multiplier: usize,
    observer: Arc<Observer>,
}

impl SearchPipeline {
    pub(crate) fn new(
        storage: Arc<dyn IKnowledgeStorage>,
        normalizer: Arc<NormalizationEngine>,
        intent_map: Arc<IntentCategoryMap>,
        config: &RetrievalConfig,
        observer: Arc<Observer>,
    ) -> Self {
        Self {
            lexical: LexicalIndex::new(Arc::clone(&storage)),
            fuzzy: FuzzyMatcher::new(config.fuzzy_threshold),
            intent: IntentWeightedSearch::new(
                Arc::clone(&storage),
                intent_map,
                config.min_intent_confidence,
            ),
            weights: StrategyWeights::from_config(config),
            candidate_multiplier: config.candidate_multiplier.max(1),
            storage,
            normalizer,
            observer,
        }
    }

    pub fn normalizer(&self) -> &Arc<NormalizationEngine> {
        &self.normalizer
    }

    pub fn lexical(&self) -> &LexicalIndex {
        &self.lexical
    }

    /// Candidates fetched from each strategy for `n` requested results.
    pub fn candidate_limit(&self, n: usize) -> usize {
        n.saturating_mul(self.candidate_multiplier)
    }

    /// Keyword strategy: lexical candidates rescored with the base scorer.
    /// Returns the list, the lexical method used, and the raw candidate count.
    fn keyword_strategy(
        &self,
        analysis: &QueryAnalysis,
        request: &SearchRequest,
        limit: usize,
    ) -> (Vec<ScoredEntry>, SearchMethod, usize) {
        let outcome = match self.lexical.search(analysis, limit) {
            Ok(outcome) => outcome,
            Err(e) => {
                events::strategy_failed(Strategy::Keyword.as_str(), &e.to_string());
                self.observer
                    .degraded(DegradationEvent::new(COMPONENT_LEXICAL, e.to_string(), "excluded"));
                return (Vec::new(), SearchMethod::None, 0);
            }
        };
        if let Some(event) = outcome.degradation {
            self.observer.degraded(event);
        } else if outcome.index_answered {
            self.observer.recovered(COMPONENT_LEXICAL);
        }

        let found = outcome.entries.len();
        let rescored = outcome
            .entries
            .into_iter()
            .filter_map(|mut scored| {
                scored.relevance_score = score_entry(
                    &scored.entry,
                    analysis,
                    request.category,
                    request.intent.as_ref(),
                );
                (scored.relevance_score > 0.0).then_some(scored)
            })
            .collect();
        (rescored, outcome.method, found)
    }

    fn fuzzy_strategy(&self, analysis: &QueryAnalysis, limit: usize) -> Vec<ScoredEntry> {
        match self.storage.read_active_entries() {
            Ok(active) => {
                let mut hits = self.fuzzy.search(&analysis.keywords, &active);
                hits.truncate(limit);
                hits
            }
            Err(e) => {
                events::strategy_failed(Strategy::Fuzzy.as_str(), &e.to_string());
                self.observer
                    .degraded(DegradationEvent::new(COMPONENT_FUZZY, e.to_string(), "excluded"));
                Vec::new()
            }
        }
    }

    /// Run every strategy and merge. Strategy failures are logged and
    /// excluded; only invalid input errors.
    pub fn run(&self, request: &SearchRequest) -> KbResult<SearchResult> {
        validate_request(request)?;
        let start = Instant::now();
        let span = search_span!(request.query, request.intent.as_ref().map(|i| i.name.as_str()));
        let _guard = span.enter();

        let analysis = self.normalizer.analyze(&request.query);
        if analysis.is_empty() {
            debug!("query empty after normalization");
            return Ok(SearchResult::empty(SearchMethod::None, elapsed_ms(start)));
        }
        let limit = self.candidate_limit(request.max_results);

        let mut lists: Vec<(Strategy, Vec<ScoredEntry>)> = Vec::new();
        let mut methods: Vec<SearchMethod> = Vec::new();

        let (keyword_hits, lexical_method, lexical_found) =
            self.keyword_strategy(&analysis, request, limit);
        if !keyword_hits.is_empty() {
            lists.push((Strategy::Keyword, keyword_hits));
            methods.push(lexical_method);
        }

        if lexical_found < request.max_results {
            let fuzzy_hits = self.fuzzy_strategy(&analysis, limit);
            if !fuzzy_hits.is_empty() {
                lists.push((Strategy::Fuzzy, fuzzy_hits));
                methods.push(SearchMethod::Fuzzy);
            }
        }

        let mut intent_hits = self.intent.search(&analysis, request.intent.as_ref());
        intent_hits.truncate(limit);
        if !intent_hits.is_empty() {
            lists.push((Strategy::Intent, intent_hits));
            methods.push(SearchMethod::Intent);
        }

        let mut merged = merge(&lists, &self.weights, request.min_relevance);
        let total_found = merged.len();
        merged.truncate(request.max_results);

        let method = match (merged.is_empty(), methods.as_slice()) {
            (true, _) => SearchMethod::None,
            (false, [single]) => *single,
            (false, _) => SearchMethod::MultiStrategy,
        };
        let processing_time_ms = elapsed_ms(start);
        events::search_completed(method.as_str(), total_found, processing_time_ms);

        Ok(SearchResult {
            entries: merged,
            total_found,
            method,
            processing_time_ms,
        })
    }
}

impl IKnowledgeSearcher for SearchPipeline {
    fn search(&self, request: &SearchRequest) -> KbResult<SearchResult> {
        self.run(request)
    }
}

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
