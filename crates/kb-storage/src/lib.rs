//! # kb-storage
//!
//! SQLite persistence for the knowledge base. Entries live in
//! `knowledge_entries`; an FTS5 projection and per-entry embeddings are
//! kept in sync inside the same transactions as the entry writes.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use kb_core::errors::{KbError, StorageError};

/// Wrap a rusqlite (or row decoding) failure as a storage error.
pub(crate) fn to_storage_err(message: String) -> KbError {
    StorageError::SqliteError { message }.into()
}
