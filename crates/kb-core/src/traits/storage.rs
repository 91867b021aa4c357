use crate::errors::KbResult;
use crate::models::{Category, EmbeddingVector, KnowledgeEntry};

/// Knowledge store: entry CRUD, the full-text projection and embedding
/// persistence.
pub trait IKnowledgeStorage: Send + Sync {
    // --- CRUD ---
    /// Insert an entry, returning its assigned id. A positive `entry.id` is kept.
    fn create(&self, entry: &KnowledgeEntry) -> KbResult<i64>;
    fn get(&self, id: i64) -> KbResult<Option<KnowledgeEntry>>;
    fn update(&self, entry: &KnowledgeEntry) -> KbResult<()>;
    fn delete(&self, id: i64) -> KbResult<()>;

    // --- Bulk ---
    fn create_bulk(&self, entries: &[KnowledgeEntry]) -> KbResult<Vec<i64>>;

    // --- Query ---
    fn read_active_entries(&self) -> KbResult<Vec<KnowledgeEntry>>;
    fn read_entries_by_category(&self, category: Category) -> KbResult<Vec<KnowledgeEntry>>;
    fn count_active(&self) -> KbResult<usize>;

    // --- Search ---
    /// Ranked full-text search over active entries. Scores are positive,
    /// higher is better.
    fn search_fulltext(&self, query: &str, limit: usize) -> KbResult<Vec<(KnowledgeEntry, f64)>>;

    // --- Embeddings ---
    fn store_embedding(&self, embedding: &EmbeddingVector) -> KbResult<()>;
    fn load_embeddings(&self, model: &str) -> KbResult<Vec<EmbeddingVector>>;
    fn delete_embedding(&self, entry_id: i64) -> KbResult<()>;
}

impl<T: IKnowledgeStorage> IKnowledgeStorage for std::sync::Arc<T> {
    fn create(&self, entry: &KnowledgeEntry) -> KbResult<i64> {
        (**self).create(entry)
    }
    fn get(&self, id: i64) -> KbResult<Option<KnowledgeEntry>> {
        (**self).get(id)
    }
    fn update(&self, entry: &KnowledgeEntry) -> KbResult<()> {
        (**self).update(entry)
    }
    fn delete(&self, id: i64) -> KbResult<()> {
        (**self).delete(id)
    }
    fn create_bulk(&self, entries: &[KnowledgeEntry]) -> KbResult<Vec<i64>> {
        (**self).create_bulk(entries)
    }
    fn read_active_entries(&self) -> KbResult<Vec<KnowledgeEntry>> {
        (**self).read_active_entries()
    }
    fn read_entries_by_category(&self, category: Category) -> KbResult<Vec<KnowledgeEntry>> {
        (**self).read_entries_by_category(category)
    }
    fn count_active(&self) -> KbResult<usize> {
        (**self).count_active()
    }
    fn search_fulltext(&self, query: &str, limit: usize) -> KbResult<Vec<(KnowledgeEntry, f64)>> {
        (**self).search_fulltext(query, limit)
    }
    fn store_embedding(&self, embedding: &EmbeddingVector) -> KbResult<()> {
        (**self).store_embedding(embedding)
    }
    fn load_embeddings(&self, model: &str) -> KbResult<Vec<EmbeddingVector>> {
        (**self).load_embeddings(model)
    }
    fn delete_embedding(&self, entry_id: i64) -> KbResult<()> {
        (**self).delete_embedding(entry_id)
    }
}
