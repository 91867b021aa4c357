//! Versioned schema migrations, tracked in `schema_version`.

mod v001_knowledge_entries;
mod v002_fts5_index;
mod v003_entry_embeddings;

use rusqlite::Connection;
use tracing::{debug, info};

use kb_core::errors::{KbResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> KbResult<()>;

const MIGRATIONS: [(u32, Migration); 3] = [
    (1, v001_knowledge_entries::migrate),
    (2, v002_fts5_index::migrate),
    (3, v003_entry_embeddings::migrate),
];

/// Latest schema version.
pub const LATEST_VERSION: u32 = 3;

/// Current schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> KbResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every pending migration, each in its own transaction.
/// Returns the number applied.
pub fn run_migrations(conn: &Connection) -> KbResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        let result = migrate(&tx).and_then(|()| {
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )
            .map_err(|e| to_storage_err(e.to_string()))
        });
        match result {
            Ok(_) => {
                tx.commit().map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
                debug!(version, "migration applied");
                applied += 1;
            }
            Err(e) => {
                let _ = tx.rollback();
                return Err(StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }

    if applied > 0 {
        info!(applied, version = LATEST_VERSION, "schema migrated");
    }
    Ok(applied)
}
