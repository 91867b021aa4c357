//! Read-side queries over active entries.

use rusqlite::{params, Connection};

use kb_core::errors::KbResult;
use kb_core::models::{Category, KnowledgeEntry};

use super::entry_crud::{parse_entry_row, ENTRY_COLUMNS};
use crate::to_storage_err;

/// All active entries, ordered by id.
pub fn read_active(conn: &Connection) -> KbResult<Vec<KnowledgeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM knowledge_entries e WHERE e.is_active = 1 ORDER BY e.id"
    );
    collect_entries(conn, &sql, params![])
}

/// Active entries of one category, ordered by descending priority then id.
pub fn read_by_category(conn: &Connection, category: Category) -> KbResult<Vec<KnowledgeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM knowledge_entries e
         WHERE e.is_active = 1 AND e.category = ?1
         ORDER BY COALESCE(e.priority, 0) DESC, e.id"
    );
    collect_entries(conn, &sql, params![category.as_str()])
}

pub fn count_active(conn: &Connection) -> KbResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM knowledge_entries WHERE is_active = 1",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as usize)
}

fn collect_entries(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> KbResult<Vec<KnowledgeEntry>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| Ok(parse_entry_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(results)
}
