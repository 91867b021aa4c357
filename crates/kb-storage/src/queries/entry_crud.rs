//! Insert, update, get, delete and bulk insert for knowledge entries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use kb_core::errors::{KbError, KbResult};
use kb_core::models::{Category, KnowledgeEntry, Metadata};

use crate::to_storage_err;

/// Column list shared by every entry SELECT. Keep in sync with
/// [`parse_entry_row`].
pub const ENTRY_COLUMNS: &str = "e.id, e.category, e.title, e.content, e.keywords_json, e.tags, \
     e.priority, e.is_active, e.created_at, e.updated_at, e.metadata";

/// Insert one entry in its own transaction. Returns the assigned id.
pub fn insert_entry(conn: &Connection, entry: &KnowledgeEntry) -> KbResult<i64> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_entry begin: {e}")))?;

    match insert_entry_inner(&tx, entry) {
        Ok(id) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_entry commit: {e}")))?;
            Ok(id)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn insert_entry_inner(conn: &Connection, entry: &KnowledgeEntry) -> KbResult<i64> {
    let keywords_json = serde_json::to_string(&entry.keywords)?;
    let tags_json = serde_json::to_string(&entry.tags)?;
    let metadata_json = serde_json::to_string(&entry.metadata)?;
    let id = (entry.id > 0).then_some(entry.id);

    conn.execute(
        "INSERT INTO knowledge_entries (
            id, category, title, content, keywords, keywords_json, tags,
            priority, is_active, created_at, updated_at, metadata
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            id,
            entry.category.as_str(),
            entry.title,
            entry.content,
            entry.keywords_text(),
            keywords_json,
            tags_json,
            entry.priority,
            entry.is_active,
            entry.created_at.to_rfc3339(),
            entry.updated_at.to_rfc3339(),
            metadata_json,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

/// Get an entry by id, active or not.
pub fn get_entry(conn: &Connection, id: i64) -> KbResult<Option<KnowledgeEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM knowledge_entries e WHERE e.id = ?1");
    let row = conn
        .query_row(&sql, params![id], |row| Ok(parse_entry_row(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.transpose()
}

/// Overwrite every mutable field of an existing entry. The FTS5 projection
/// follows through the update trigger.
pub fn update_entry(conn: &Connection, entry: &KnowledgeEntry) -> KbResult<()> {
    let keywords_json = serde_json::to_string(&entry.keywords)?;
    let tags_json = serde_json::to_string(&entry.tags)?;
    let metadata_json = serde_json::to_string(&entry.metadata)?;

    let changed = conn
        .execute(
            "UPDATE knowledge_entries SET
                category = ?2, title = ?3, content = ?4, keywords = ?5,
                keywords_json = ?6, tags = ?7, priority = ?8, is_active = ?9,
                updated_at = ?10, metadata = ?11
             WHERE id = ?1",
            params![
                entry.id,
                entry.category.as_str(),
                entry.title,
                entry.content,
                entry.keywords_text(),
                keywords_json,
                tags_json,
                entry.priority,
                entry.is_active,
                entry.updated_at.to_rfc3339(),
                metadata_json,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if changed == 0 {
        return Err(KbError::EntryNotFound { id: entry.id });
    }
    Ok(())
}

/// Delete an entry. Its FTS5 row and embedding go with it.
pub fn delete_entry(conn: &Connection, id: i64) -> KbResult<()> {
    let changed = conn
        .execute("DELETE FROM knowledge_entries WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(KbError::EntryNotFound { id });
    }
    Ok(())
}

/// Insert many entries in one transaction. All-or-nothing.
pub fn bulk_insert(conn: &Connection, entries: &[KnowledgeEntry]) -> KbResult<Vec<i64>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("bulk_insert begin: {e}")))?;

    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        match insert_entry_inner(&tx, entry) {
            Ok(id) => ids.push(id),
            Err(e) => {
                let _ = tx.rollback();
                return Err(e);
            }
        }
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("bulk_insert commit: {e}")))?;
    Ok(ids)
}

/// Decode a row selected with [`ENTRY_COLUMNS`].
pub fn parse_entry_row(row: &Row<'_>) -> KbResult<KnowledgeEntry> {
    let get_err = |e: rusqlite::Error| to_storage_err(e.to_string());

    let id: i64 = row.get(0).map_err(get_err)?;
    let category: String = row.get(1).map_err(get_err)?;
    let keywords_json: String = row.get(4).map_err(get_err)?;
    let tags_json: String = row.get(5).map_err(get_err)?;
    let created_at: String = row.get(8).map_err(get_err)?;
    let updated_at: String = row.get(9).map_err(get_err)?;
    let metadata_json: String = row.get(10).map_err(get_err)?;

    Ok(KnowledgeEntry {
        id,
        category: category.parse::<Category>()?,
        title: row.get(2).map_err(get_err)?,
        content: row.get(3).map_err(get_err)?,
        keywords: serde_json::from_str(&keywords_json)?,
        tags: serde_json::from_str(&tags_json)?,
        priority: row.get(6).map_err(get_err)?,
        is_active: row.get(7).map_err(get_err)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
        metadata: serde_json::from_str::<Metadata>(&metadata_json)?,
    })
}

fn parse_timestamp(raw: &str) -> KbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw:?}: {e}")))
}
