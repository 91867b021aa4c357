//! StorageEngine: owns the ConnectionPool and implements IKnowledgeStorage.

use std::path::Path;

use tracing::debug;

use kb_core::config::StorageConfig;
use kb_core::errors::KbResult;
use kb_core::models::{Category, EmbeddingVector, KnowledgeEntry};
use kb_core::traits::IKnowledgeStorage;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{embedding_ops, entry_crud, entry_query, fulltext_search};

/// SQLite-backed knowledge store.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> KbResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let engine = Self { pool };
        engine.initialize()?;
        debug!(path = %path.display(), read_pool_size, "storage opened");
        Ok(engine)
    }

    /// Open from the `[storage]` config section.
    pub fn from_config(config: &StorageConfig) -> KbResult<Self> {
        Self::open(Path::new(&config.db_path), config.read_pool_size)
    }

    /// Open an in-memory storage engine. All reads go through the writer.
    pub fn open_in_memory() -> KbResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> KbResult<()> {
        self.pool.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Current schema version.
    pub fn schema_version(&self) -> KbResult<u32> {
        self.pool.writer.with_conn(migrations::current_version)
    }

    /// Rebuild the FTS5 projection from the entries table.
    pub fn rebuild_fulltext_index(&self) -> KbResult<()> {
        self.pool.writer.with_conn(fulltext_search::rebuild_index)
    }

    /// File-backed: the read pool. In-memory: the writer.
    fn with_reader<F, T>(&self, f: F) -> KbResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> KbResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }
}

impl IKnowledgeStorage for StorageEngine {
    fn create(&self, entry: &KnowledgeEntry) -> KbResult<i64> {
        self.pool
            .writer
            .with_conn(|conn| entry_crud::insert_entry(conn, entry))
    }

    fn get(&self, id: i64) -> KbResult<Option<KnowledgeEntry>> {
        self.with_reader(|conn| entry_crud::get_entry(conn, id))
    }

    fn update(&self, entry: &KnowledgeEntry) -> KbResult<()> {
        self.pool
            .writer
            .with_conn(|conn| entry_crud::update_entry(conn, entry))
    }

    fn delete(&self, id: i64) -> KbResult<()> {
        self.pool
            .writer
            .with_conn(|conn| entry_crud::delete_entry(conn, id))
    }

    fn create_bulk(&self, entries: &[KnowledgeEntry]) -> KbResult<Vec<i64>> {
        self.pool
            .writer
            .with_conn(|conn| entry_crud::bulk_insert(conn, entries))
    }

    fn read_active_entries(&self) -> KbResult<Vec<KnowledgeEntry>> {
        self.with_reader(entry_query::read_active)
    }

    fn read_entries_by_category(&self, category: Category) -> KbResult<Vec<KnowledgeEntry>> {
        self.with_reader(|conn| entry_query::read_by_category(conn, category))
    }

    fn count_active(&self) -> KbResult<usize> {
        self.with_reader(entry_query::count_active)
    }

    fn search_fulltext(&self, query: &str, limit: usize) -> KbResult<Vec<(KnowledgeEntry, f64)>> {
        if query.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        self.with_reader(|conn| fulltext_search::search_fts5(conn, query, limit))
    }

    fn store_embedding(&self, embedding: &EmbeddingVector) -> KbResult<()> {
        self.pool
            .writer
            .with_conn(|conn| embedding_ops::store_embedding(conn, embedding))
    }

    fn load_embeddings(&self, model: &str) -> KbResult<Vec<EmbeddingVector>> {
        self.with_reader(|conn| embedding_ops::load_embeddings(conn, model))
    }

    fn delete_embedding(&self, entry_id: i64) -> KbResult<()> {
        self.pool
            .writer
            .with_conn(|conn| embedding_ops::delete_embedding(conn, entry_id))
    }
}
