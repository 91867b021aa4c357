//! v002: FTS5 projection over category, title, content and keywords, with
//! sync triggers. Inactive rows are indexed too and filtered at query time,
//! so toggling `is_active` never needs an index rebuild.

use rusqlite::Connection;

use kb_core::errors::KbResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> KbResult<()> {
    conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS knowledge_fts USING fts5(
            category,
            title,
            content,
            keywords,
            content='knowledge_entries',
            content_rowid='id',
            tokenize='unicode61 remove_diacritics 2'
        );

        CREATE TRIGGER IF NOT EXISTS knowledge_fts_insert AFTER INSERT ON knowledge_entries BEGIN
            INSERT INTO knowledge_fts(rowid, category, title, content, keywords)
            VALUES (new.id, new.category, new.title, new.content, new.keywords);
        END;

        CREATE TRIGGER IF NOT EXISTS knowledge_fts_delete BEFORE DELETE ON knowledge_entries BEGIN
            INSERT INTO knowledge_fts(knowledge_fts, rowid, category, title, content, keywords)
            VALUES ('delete', old.id, old.category, old.title, old.content, old.keywords);
        END;

        CREATE TRIGGER IF NOT EXISTS knowledge_fts_update AFTER UPDATE ON knowledge_entries BEGIN
            INSERT INTO knowledge_fts(knowledge_fts, rowid, category, title, content, keywords)
            VALUES ('delete', old.id, old.category, old.title, old.content, old.keywords);
            INSERT INTO knowledge_fts(rowid, category, title, content, keywords)
            VALUES (new.id, new.category, new.title, new.content, new.keywords);
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
