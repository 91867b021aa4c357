//! KnowledgeEngine: the entry point that owns storage, the normalizer,
//! every strategy, the vector index, the result cache and metrics.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use kb_core::config::KbConfig;
use kb_core::constants::{COMPONENT_EMBEDDINGS, COMPONENT_LEXICAL, COMPONENT_VECTOR};
use kb_core::errors::{KbError, KbResult};
use kb_core::models::{
    CacheStats, DegradationEvent, EmbeddingVector, FormattedContext, KnowledgeEntry, MatchReason, ScoredEntry,
    SearchRequest, SearchResult, Strategy, VectorStats,
};
use kb_core::traits::{IEmbeddingProvider, IKnowledgeSearcher, IKnowledgeStorage};
use kb_embeddings::EmbeddingEngine;
use kb_observability::tracing_setup::events;
use kb_observability::{hybrid_span, precompute_span, MetricsCollector};
use kb_storage::StorageEngine;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, CachedSearcher, PayloadKind, ResultCache};
use crate::context::ContextFormatter;
use crate::intent::IntentCategoryMap;
use crate::normalization::NormalizationEngine;
use crate::observer::Observer;
use crate::pipeline::{elapsed_ms, validate_request, SearchPipeline};
use crate::ranking::{fuse, RankedList};
use crate::vector::VectorIndex;

pub struct KnowledgeEngine {
    storage: Arc<dyn IKnowledgeStorage>,
    config: KbConfig,
    normalizer: Arc<NormalizationEngine>,
    pipeline: Arc<SearchPipeline>,
    searcher: CachedSearcher<Arc<SearchPipeline>>,
    cache: Arc<ResultCache>,
    embeddings: Arc<EmbeddingEngine>,
    vector_index: Arc<VectorIndex>,
    formatter: ContextFormatter,
    observer: Arc<Observer>,
    /// One precompute run at a time.
    precompute_lock: Mutex<()>,
    /// Serializes entry writes with vector commits. Never held across a
    /// batch embedding call.
    write_lock: Mutex<()>,
}

impl KnowledgeEngine {
    /// Build an engine over `storage`, creating the embedding provider chain
    /// from `config.embedding`.
    pub fn new(storage: Arc<dyn IKnowledgeStorage>, config: KbConfig) -> KbResult<Self> {
        let embeddings = EmbeddingEngine::new(config.embedding.clone())?;
        Self::with_embeddings(storage, config, embeddings)
    }

    /// Build an engine with a caller-supplied embedding provider.
    pub fn with_embedder(
        storage: Arc<dyn IKnowledgeStorage>,
        config: KbConfig,
        provider: Box<dyn IEmbeddingProvider>,
    ) -> KbResult<Self> {
        let embeddings = EmbeddingEngine::with_provider(provider, config.embedding.clone());
        Self::with_embeddings(storage, config, embeddings)
    }

    fn with_embeddings(
        storage: Arc<dyn IKnowledgeStorage>,
        config: KbConfig,
        embeddings: EmbeddingEngine,
    ) -> KbResult<Self> {
        config.retrieval.validate()?;

        let normalizer = Arc::new(NormalizationEngine::new(config.normalization.clone()));
        let intent_map = Arc::new(IntentCategoryMap::from_config(&config.intents));
        let observer = Arc::new(Observer::default());
        let pipeline = Arc::new(SearchPipeline::new(
            Arc::clone(&storage),
            Arc::clone(&normalizer),
            intent_map,
            &config.retrieval,
            Arc::clone(&observer),
        ));
        let cache = Arc::new(ResultCache::new(&config.cache));
        let searcher = CachedSearcher::new(Arc::clone(&pipeline), Arc::clone(&cache));

        let embeddings = Arc::new(embeddings);
        let embedder: Arc<dyn IEmbeddingProvider> = embeddings.clone();
        let vector_index = Arc::new(VectorIndex::new(embedder));

        info!(
            provider = embeddings.active_provider(),
            dims = embeddings.dimensions(),
            cache = cache.is_enabled(),
            "KnowledgeEngine initialized"
        );

        Ok(Self {
            formatter: ContextFormatter::new(config.retrieval.context_content_chars),
            storage,
            config,
            normalizer,
            pipeline,
            searcher,
            cache,
            embeddings,
            vector_index,
            observer,
            precompute_lock: Mutex::new(()),
            write_lock: Mutex::new(()),
        })
    }

    /// Open file-backed storage at `config.storage.db_path`.
    pub fn open(config: KbConfig) -> KbResult<Self> {
        let storage = StorageEngine::from_config(&config.storage)?;
        Self::new(Arc::new(storage), config)
    }

    pub fn open_in_memory(config: KbConfig) -> KbResult<Self> {
        let storage = StorageEngine::open_in_memory()?;
        Self::new(Arc::new(storage), config)
    }

    pub fn storage(&self) -> &Arc<dyn IKnowledgeStorage> {
        &self.storage
    }

    pub fn config(&self) -> &KbConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &NormalizationEngine {
        &self.normalizer
    }

    pub fn vector_index(&self) -> &VectorIndex {
        &self.vector_index
    }

    // --- Search ---

    pub fn search(
        &self,
        query: &str,
        max_results: usize,
        min_relevance: f64,
    ) -> KbResult<SearchResult> {
        self.search_with(&SearchRequest::new(query, max_results, min_relevance))
    }

    /// A request carrying the configured `max_results` and `min_relevance`.
    pub fn default_request(&self, query: &str) -> SearchRequest {
        SearchRequest::new(
            query,
            self.config.retrieval.max_results,
            self.config.retrieval.min_relevance,
        )
    }

    /// Multi-strategy search through the result cache.
    pub fn search_with(&self, request: &SearchRequest) -> KbResult<SearchResult> {
        validate_request(request)?;
        let (result, cached) = self.searcher.search_cached(request)?;
        self.observer.with_metrics(|m| {
            if cached {
                m.retrieval.record_cache_served();
            } else {
                m.retrieval.record_query(
                    result.method.as_str(),
                    result.total_found,
                    result.processing_time_ms,
                );
            }
        });
        Ok(result)
    }

    /// Lexical + vector search fused by reciprocal rank. The vector list is
    /// empty until [`enable_vector_search`](Self::enable_vector_search) runs.
    pub fn search_hybrid(&self, query: &str, top_k: usize) -> KbResult<Vec<ScoredEntry>> {
        if top_k == 0 {
            return Err(KbError::invalid_input("top_k must be at least 1"));
        }
        let start = Instant::now();
        let span = hybrid_span!(query, top_k);
        let _guard = span.enter();

        let analysis = self.normalizer.analyze(query);
        if analysis.is_empty() {
            return Ok(Vec::new());
        }
        let limit = self.pipeline.candidate_limit(top_k);

        let lexical = match self.pipeline.lexical().search(&analysis, limit) {
            Ok(outcome) => {
                if let Some(event) = outcome.degradation {
                    self.observer.degraded(event);
                } else if outcome.index_answered {
                    self.observer.recovered(COMPONENT_LEXICAL);
                }
                outcome.entries
            }
            Err(e) => {
                events::strategy_failed(Strategy::Keyword.as_str(), &e.to_string());
                self.observer
                    .degraded(DegradationEvent::new(COMPONENT_LEXICAL, e.to_string(), "excluded"));
                Vec::new()
            }
        };
        let vector = self.vector_candidates(query, limit);

        let fused = fuse(
            &[RankedList::lexical(lexical), RankedList::vector(vector)],
            self.config.retrieval.rrf_k,
            top_k,
        );
        self.sync_embedding_events();

        let ms = elapsed_ms(start);
        events::search_completed("hybrid", fused.len(), ms);
        self.observer
            .with_metrics(|m| m.retrieval.record_query("hybrid", fused.len(), ms));
        Ok(fused)
    }

    fn vector_candidates(&self, query: &str, limit: usize) -> Vec<ScoredEntry> {
        if !self.vector_index.is_enabled() {
            return Vec::new();
        }
        let hits = match self.vector_index.search(query, limit) {
            Ok(hits) => {
                self.observer.recovered(COMPONENT_VECTOR);
                hits
            }
            Err(e) if e.is_embedding_unavailable() => {
                debug!(error = %e, "vector strategy unavailable");
                return Vec::new();
            }
            Err(e) => {
                events::strategy_failed(Strategy::Vector.as_str(), &e.to_string());
                self.observer
                    .degraded(DegradationEvent::new(COMPONENT_VECTOR, e.to_string(), "excluded"));
                return Vec::new();
            }
        };
        if hits.is_empty() {
            return Vec::new();
        }

        let active: HashMap<i64, KnowledgeEntry> = match self.storage.read_active_entries() {
            Ok(entries) => entries.into_iter().map(|e| (e.id, e)).collect(),
            Err(e) => {
                events::strategy_failed(Strategy::Vector.as_str(), &e.to_string());
                self.observer
                    .degraded(DegradationEvent::new(COMPONENT_VECTOR, e.to_string(), "excluded"));
                return Vec::new();
            }
        };
        hits.into_iter()
            .filter_map(|(id, sim)| {
                active
                    .get(&id)
                    .map(|entry| ScoredEntry::new(entry.clone(), sim, MatchReason::Vector))
            })
            .collect()
    }

    // --- Context ---

    pub fn format_context_for_ai(
        &self,
        result: &SearchResult,
        max_entries: usize,
    ) -> FormattedContext {
        self.formatter.format(result, max_entries)
    }

    /// Search and format in one step, caching the formatted context.
    pub fn cached_context_for(&self, request: &SearchRequest) -> KbResult<FormattedContext> {
        validate_request(request)?;
        let key = cache_key(PayloadKind::Context, request);
        if let Some(context) = self.cache.get_context(&key) {
            self.observer.with_metrics(|m| m.retrieval.record_cache_served());
            return Ok(context);
        }
        let result = self.search_with(request)?;
        let context = self.format_context_for_ai(&result, self.config.retrieval.context_max_entries);
        self.cache.put_context(key, context.clone());
        Ok(context)
    }

    // --- Cache ---

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    // --- Vector search ---

    /// Enable the vector strategy and embed every active entry that has no
    /// current vector. Persisted vectors for the active model are reused when
    /// their content hash still matches. Queries and writes keep running
    /// while this runs; a vector whose entry was updated or removed during
    /// its embedding is discarded rather than stored.
    pub fn enable_vector_search(&self) -> KbResult<VectorStats> {
        let _running = self
            .precompute_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let model = self.embeddings.model_id();

        let (stale, restored) = {
            let _writes = self.lock_writes();
            self.vector_index.set_enabled(true);
            let entries = self.storage.read_active_entries()?;
            let persisted = self.storage.load_embeddings(&model).unwrap_or_else(|e| {
                warn!(error = %e, model = %model, "could not load persisted embeddings");
                Vec::new()
            });
            let current: HashMap<i64, String> =
                entries.iter().map(|e| (e.id, e.content_hash())).collect();
            let fresh: Vec<_> = persisted
                .into_iter()
                .filter(|v| current.get(&v.entry_id) == Some(&v.content_hash))
                .collect();
            let restored = self.vector_index.load(fresh);
            let stale: Vec<KnowledgeEntry> = entries
                .into_iter()
                .filter(|e| !self.vector_index.is_current(e.id, &e.content_hash(), &model))
                .collect();
            (stale, restored)
        };

        let span = precompute_span!(stale.len());
        let _guard = span.enter();
        let (report, _) = self.vector_index.precompute_with(
            &stale,
            self.config.embedding.batch_size,
            |vectors| self.commit_vectors(vectors),
        );

        events::precompute_completed(report.embedded, report.skipped + report.failed, report.elapsed_ms);
        debug!(restored, discarded = report.discarded, "persisted vectors reused");
        let provider = self.embeddings.active_provider().to_string();
        self.observer.with_metrics(|m| {
            m.embedding.record_provider(&provider);
            m.embedding
                .record_precompute(report.embedded, report.failed, report.elapsed_ms);
        });
        self.sync_embedding_events();
        Ok(self.vector_stats())
    }

    /// Store and persist each vector whose entry is still active with the
    /// content it was embedded from.
    fn commit_vectors(&self, vectors: Vec<EmbeddingVector>) -> Vec<EmbeddingVector> {
        let _writes = self.lock_writes();
        let mut committed = Vec::with_capacity(vectors.len());
        for vector in vectors {
            let id = vector.entry_id;
            let unchanged = match self.storage.get(id) {
                Ok(Some(entry)) => entry.is_active && entry.content_hash() == vector.content_hash,
                Ok(None) => false,
                Err(e) => {
                    warn!(entry_id = id, error = %e, "could not re-read entry before commit");
                    false
                }
            };
            if !unchanged {
                debug!(entry_id = id, "entry changed during embedding, vector discarded");
                continue;
            }
            if let Err(e) = self.vector_index.insert(vector.clone()) {
                warn!(entry_id = id, error = %e, "skipping vector");
                continue;
            }
            if let Err(e) = self.storage.store_embedding(&vector) {
                warn!(entry_id = id, error = %e, "failed to persist embedding");
            }
            committed.push(vector);
        }
        committed
    }

    /// Run [`enable_vector_search`](Self::enable_vector_search) on the
    /// blocking pool. Requires a tokio runtime.
    pub fn enable_vector_search_in_background(
        self: &Arc<Self>,
    ) -> JoinHandle<KbResult<VectorStats>> {
        let engine = Arc::clone(self);
        tokio::task::spawn_blocking(move || engine.enable_vector_search())
    }

    pub fn vector_stats(&self) -> VectorStats {
        let vectors = self.vector_index.len();
        let active_entries = self.storage.count_active().unwrap_or_else(|e| {
            warn!(error = %e, "could not count active entries");
            0
        });
        let report = self.vector_index.last_report();
        VectorStats {
            enabled: self.vector_index.is_enabled(),
            vectors,
            dimensions: self.vector_index.dimensions(),
            model: self.embeddings.model_id(),
            active_entries,
            coverage: if active_entries == 0 {
                0.0
            } else {
                vectors as f64 / active_entries as f64
            },
            last_precompute_ms: report.map(|r| r.elapsed_ms),
            skipped: report.map(|r| r.skipped + r.failed).unwrap_or(0),
        }
    }

    // --- Writes ---

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an entry and index it. Returns the assigned id.
    pub fn add_entry(&self, entry: &KnowledgeEntry) -> KbResult<i64> {
        let _writes = self.lock_writes();
        let id = self.storage.create(entry)?;
        if entry.is_active && self.vector_index.is_enabled() {
            let stored = entry.clone().with_id(id);
            self.embed_and_persist(&stored);
        }
        self.cache.clear();
        Ok(id)
    }

    pub fn update_entry(&self, entry: &KnowledgeEntry) -> KbResult<()> {
        let _writes = self.lock_writes();
        self.storage.update(entry)?;
        if entry.is_active {
            if self.vector_index.is_enabled() {
                self.embed_and_persist(entry);
            }
        } else {
            self.drop_vector(entry.id);
        }
        self.cache.clear();
        Ok(())
    }

    pub fn remove_entry(&self, id: i64) -> KbResult<()> {
        let _writes = self.lock_writes();
        self.storage.delete(id)?;
        self.vector_index.remove(id);
        self.cache.clear();
        Ok(())
    }

    fn embed_and_persist(&self, entry: &KnowledgeEntry) {
        match self.vector_index.embed_entry(entry) {
            Ok(vector) => {
                if let Err(e) = self.storage.store_embedding(&vector) {
                    warn!(entry_id = entry.id, error = %e, "failed to persist embedding");
                }
            }
            Err(e) => {
                // The old vector no longer matches the stored content.
                self.drop_vector(entry.id);
                warn!(entry_id = entry.id, error = %e, "write-through embedding failed");
                self.observer.degraded(DegradationEvent::new(
                    COMPONENT_EMBEDDINGS,
                    e.to_string(),
                    "entry reachable through lexical strategies only",
                ));
            }
        }
        self.sync_embedding_events();
    }

    fn drop_vector(&self, id: i64) {
        self.vector_index.remove(id);
        if let Err(e) = self.storage.delete_embedding(id) {
            warn!(entry_id = id, error = %e, "failed to delete persisted embedding");
        }
    }

    // --- Observability ---

    pub fn metrics_snapshot(&self) -> MetricsCollector {
        let mut snapshot = self.observer.metrics_snapshot();
        let (hits, lookups) = self.embeddings.cache_counters();
        snapshot.embedding.cache_hits = hits;
        snapshot.embedding.total_lookups = lookups;
        snapshot
    }

    /// Take every degradation recorded since the last drain.
    pub fn drain_degradations(&self) -> Vec<DegradationEvent> {
        self.sync_embedding_events();
        self.observer.drain_degradations()
    }

    /// Degradations whose component has not answered normally since.
    pub fn active_degradations(&self) -> Vec<DegradationEvent> {
        self.sync_embedding_events();
        self.observer.active_degradations()
    }

    /// Degradations of `component` recorded in the last `window_secs`
    /// seconds, recovered or not.
    pub fn recent_degradations(&self, component: &str, window_secs: i64) -> usize {
        self.sync_embedding_events();
        self.observer.recent_degradations(component, window_secs)
    }

    fn sync_embedding_events(&self) {
        for event in self.embeddings.drain_degradation_events() {
            self.observer.degraded(event);
        }
    }
}

impl IKnowledgeSearcher for KnowledgeEngine {
    fn search(&self, request: &SearchRequest) -> KbResult<SearchResult> {
        self.search_with(request)
    }
}
