//! v003: one embedding row per entry, removed with its entry.

use rusqlite::Connection;

use kb_core::errors::KbResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> KbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entry_embeddings (
            entry_id      INTEGER PRIMARY KEY,
            model         TEXT NOT NULL,
            dimensions    INTEGER NOT NULL,
            embedding     BLOB NOT NULL,
            content_hash  TEXT NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            FOREIGN KEY (entry_id) REFERENCES knowledge_entries(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_embeddings_model ON entry_embeddings(model);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
