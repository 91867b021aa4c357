//! VectorIndex: one L2-normalized embedding per active entry, searched by
//! brute-force cosine similarity.
//!
//! Reads take a snapshot of the table under a short read lock and score it
//! unlocked. Embeddings are always computed before the write lock is taken,
//! and each insert publishes one fully built vector. Every vector carries the
//! model id that produced it; a query is only scored against vectors of its
//! own model.

pub mod similarity;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use kb_core::constants::MAX_BULK_BATCH_SIZE;
use kb_core::errors::{ConfigurationError, EmbeddingError, KbError, KbResult};
use kb_core::models::{EmbeddingVector, KnowledgeEntry};
use kb_core::traits::IEmbeddingProvider;
use kb_observability::embedding_span;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use similarity::cosine_similarity;

/// Outcome of one precompute run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecomputeReport {
    pub embedded: usize,
    /// Entries without a valid id or inactive.
    pub skipped: usize,
    /// Entries whose embedding failed.
    pub failed: usize,
    /// Embedded, then refused at commit because the entry changed meanwhile.
    pub discarded: usize,
    pub elapsed_ms: u64,
}

impl PrecomputeReport {
    fn absorb(&mut self, other: PrecomputeReport) {
        self.embedded += other.embedded;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.discarded += other.discarded;
        self.elapsed_ms += other.elapsed_ms;
    }
}

#[derive(Debug, Clone)]
struct StoredVector {
    values: Arc<[f32]>,
    content_hash: String,
    model: String,
}

pub struct VectorIndex {
    embedder: Arc<dyn IEmbeddingProvider>,
    dimensions: usize,
    vectors: RwLock<HashMap<i64, StoredVector>>,
    enabled: AtomicBool,
    last_report: Mutex<Option<PrecomputeReport>>,
}

impl VectorIndex {
    pub fn new(embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        let dimensions = embedder.dimensions();
        Self {
            embedder,
            dimensions,
            vectors: RwLock::new(HashMap::new()),
            enabled: AtomicBool::new(false),
            last_report: Mutex::new(None),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    // Inserts and removals are single map operations, so a poisoned lock
    // still guards a consistent map.
    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, HashMap<i64, StoredVector>> {
        self.vectors.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<i64, StoredVector>> {
        self.vectors.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, entry_id: i64) -> bool {
        self.read_map().contains_key(&entry_id)
    }

    /// Hash of the text the stored vector was built from.
    pub fn content_hash(&self, entry_id: i64) -> Option<String> {
        self.read_map().get(&entry_id).map(|v| v.content_hash.clone())
    }

    /// Model id of the stored vector.
    pub fn model(&self, entry_id: i64) -> Option<String> {
        self.read_map().get(&entry_id).map(|v| v.model.clone())
    }

    /// Whether the stored vector was built from `content_hash` by `model`.
    pub fn is_current(&self, entry_id: i64, content_hash: &str, model: &str) -> bool {
        self.read_map()
            .get(&entry_id)
            .is_some_and(|v| v.content_hash == content_hash && v.model == model)
    }

    fn check_dimensions(&self, len: usize) -> KbResult<()> {
        if len != self.dimensions {
            return Err(ConfigurationError::DimensionMismatch {
                expected: self.dimensions,
                actual: len,
            }
            .into());
        }
        Ok(())
    }

    /// Insert or overwrite one vector. Its length must match the index.
    pub fn insert(&self, vector: EmbeddingVector) -> KbResult<()> {
        self.check_dimensions(vector.values.len())?;
        let stored = StoredVector {
            values: vector.values.into(),
            content_hash: vector.content_hash,
            model: vector.model,
        };
        self.write_map().insert(vector.entry_id, stored);
        Ok(())
    }

    pub fn remove(&self, entry_id: i64) -> bool {
        self.write_map().remove(&entry_id).is_some()
    }

    pub fn clear(&self) {
        self.write_map().clear();
    }

    /// Restore persisted vectors. Mismatched dimensions are skipped.
    pub fn load(&self, vectors: Vec<EmbeddingVector>) -> usize {
        self.insert_all(vectors).len()
    }

    /// Insert each vector, returning the ones stored.
    pub fn insert_all(&self, vectors: Vec<EmbeddingVector>) -> Vec<EmbeddingVector> {
        let mut stored = Vec::with_capacity(vectors.len());
        for v in vectors {
            let id = v.entry_id;
            match self.insert(v.clone()) {
                Ok(()) => stored.push(v),
                Err(e) => warn!(entry_id = id, error = %e, "skipping vector"),
            }
        }
        stored
    }

    /// Embed and store one entry from "title\ncontent".
    pub fn embed_entry(&self, entry: &KnowledgeEntry) -> KbResult<EmbeddingVector> {
        if entry.id <= 0 || !entry.is_active {
            return Err(KbError::invalid_input(format!(
                "entry {} is not indexable (needs a positive id and to be active)",
                entry.id
            )));
        }
        let (values, model) = self.embedder.embed_tagged(&entry.embedding_text())?;
        let vector = EmbeddingVector {
            entry_id: entry.id,
            values,
            model,
            content_hash: entry.content_hash(),
        };
        self.insert(vector.clone())?;
        Ok(vector)
    }

    /// Embed `entries` in batches and store the results, overwriting any
    /// existing vector. Entries with id ≤ 0 or inactive are skipped and
    /// reported. Returns the stored vectors for persistence.
    pub fn precompute(
        &self,
        entries: &[KnowledgeEntry],
        batch_size: usize,
    ) -> (PrecomputeReport, Vec<EmbeddingVector>) {
        self.precompute_with(entries, batch_size, |vectors| self.insert_all(vectors))
    }

    /// Like [`Self::precompute`], but each embedded batch goes through
    /// `commit`, which stores what it accepts and returns it. Embedding runs
    /// outside `commit`, so callers can hold their own lock there without
    /// holding it across provider calls.
    pub fn precompute_with<F>(
        &self,
        entries: &[KnowledgeEntry],
        batch_size: usize,
        mut commit: F,
    ) -> (PrecomputeReport, Vec<EmbeddingVector>)
    where
        F: FnMut(Vec<EmbeddingVector>) -> Vec<EmbeddingVector>,
    {
        let mut report = PrecomputeReport::default();
        let mut stored = Vec::new();
        let batch_size = batch_size.clamp(1, MAX_BULK_BATCH_SIZE);

        let (valid, invalid): (Vec<&KnowledgeEntry>, Vec<&KnowledgeEntry>) =
            entries.iter().partition(|e| e.id > 0 && e.is_active);
        report.skipped = invalid.len();
        if !invalid.is_empty() {
            debug!(skipped = invalid.len(), "precompute skipped entries without valid id or inactive");
        }

        for chunk in valid.chunks(batch_size) {
            let (mut chunk_report, vectors) = self.precompute_chunk(chunk);
            let built = vectors.len();
            let accepted = commit(vectors);
            chunk_report.embedded = accepted.len();
            chunk_report.discarded = built.saturating_sub(accepted.len());
            report.absorb(chunk_report);
            stored.extend(accepted);
        }

        if let Ok(mut last) = self.last_report.lock() {
            *last = Some(report);
        }
        (report, stored)
    }

    fn precompute_chunk(&self, chunk: &[&KnowledgeEntry]) -> (PrecomputeReport, Vec<EmbeddingVector>) {
        let start = Instant::now();
        let span = embedding_span!(self.embedder.name(), self.dimensions);
        let _guard = span.enter();
        let mut report = PrecomputeReport::default();
        let texts: Vec<String> = chunk.iter().map(|e| e.embedding_text()).collect();

        let embedded: Vec<KbResult<(Vec<f32>, String)>> =
            match self.embedder.embed_batch_tagged(&texts) {
                Ok(batch) if batch.len() == chunk.len() => batch.into_iter().map(Ok).collect(),
                Ok(batch) => {
                    warn!(expected = chunk.len(), got = batch.len(), "batch size mismatch, embedding one by one");
                    texts.iter().map(|t| self.embedder.embed_tagged(t)).collect()
                }
                Err(e) => {
                    warn!(error = %e, "batch embedding failed, embedding one by one");
                    texts.iter().map(|t| self.embedder.embed_tagged(t)).collect()
                }
            };

        let mut vectors = Vec::with_capacity(chunk.len());
        for (entry, result) in chunk.iter().zip(embedded) {
            let outcome = result.and_then(|(values, model)| {
                self.check_dimensions(values.len())?;
                Ok(EmbeddingVector {
                    entry_id: entry.id,
                    values,
                    model,
                    content_hash: entry.content_hash(),
                })
            });
            match outcome {
                Ok(v) => vectors.push(v),
                Err(e) => {
                    warn!(entry_id = entry.id, error = %e, "embedding failed for entry");
                    report.failed += 1;
                }
            }
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        (report, vectors)
    }

    pub fn last_report(&self) -> Option<PrecomputeReport> {
        self.last_report.lock().ok().and_then(|r| *r)
    }

    /// Top `top_k` `(entry_id, similarity)` by descending similarity, ties
    /// by ascending id. Errors with `VectorSearchDisabled` until enabled. A
    /// stored vector of the wrong length is skipped, not fatal, and vectors
    /// of another model than the one serving the query are ignored.
    pub fn search(&self, query_text: &str, top_k: usize) -> KbResult<Vec<(i64, f64)>> {
        if !self.is_enabled() {
            return Err(EmbeddingError::VectorSearchDisabled.into());
        }
        if top_k == 0 {
            return Ok(Vec::new());
        }

        if self.is_empty() {
            return Ok(Vec::new());
        }
        let (query, model) = self.embedder.embed_tagged(query_text)?;
        let snapshot: Vec<(i64, Arc<[f32]>)> = self
            .read_map()
            .iter()
            .filter(|(_, v)| v.model == model)
            .map(|(id, v)| (*id, Arc::clone(&v.values)))
            .collect();

        let mut scored: Vec<(i64, f64)> = Vec::with_capacity(snapshot.len());
        for (id, values) in &snapshot {
            match cosine_similarity(&query, values) {
                Ok(sim) => scored.push((*id, sim)),
                Err(e) => warn!(entry_id = id, error = %e, "skipping vector comparison"),
            }
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_k);
        Ok(scored)
    }
}
