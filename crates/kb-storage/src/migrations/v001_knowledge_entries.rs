//! v001: knowledge_entries table.

use rusqlite::Connection;

use kb_core::errors::KbResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> KbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS knowledge_entries (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            category      TEXT NOT NULL,
            title         TEXT NOT NULL,
            content       TEXT NOT NULL,
            -- Space-joined keywords, indexed by FTS5.
            keywords      TEXT NOT NULL DEFAULT '',
            -- Ordered keyword list as JSON.
            keywords_json TEXT NOT NULL DEFAULT '[]',
            tags          TEXT NOT NULL DEFAULT '[]',
            priority      INTEGER CHECK (priority IS NULL OR priority BETWEEN 0 AND 10),
            is_active     INTEGER NOT NULL DEFAULT 1,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            metadata      TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_entries_category_active
            ON knowledge_entries(category, is_active);
        CREATE INDEX IF NOT EXISTS idx_entries_active
            ON knowledge_entries(is_active);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
