//! FTS5 full-text search over the knowledge projection.

use rusqlite::{params, Connection};

use kb_core::errors::{KbResult, StorageError};
use kb_core::models::KnowledgeEntry;

use super::entry_crud::{parse_entry_row, ENTRY_COLUMNS};
use crate::to_storage_err;

/// bm25 column weights, in FTS column order: category, title, content, keywords.
/// Title outranks keywords, keywords outrank category, category outranks content.
pub const BM25_WEIGHTS: [f64; 4] = [2.0, 10.0, 1.0, 5.0];

/// Search active entries with an FTS5 MATCH expression.
///
/// Returns `(entry, score)` ordered best-first, where `score = -bm25 > 0`.
/// A malformed MATCH expression surfaces as [`StorageError::IndexUnavailable`].
pub fn search_fts5(
    conn: &Connection,
    query: &str,
    limit: usize,
) -> KbResult<Vec<(KnowledgeEntry, f64)>> {
    let [w_category, w_title, w_content, w_keywords] = BM25_WEIGHTS;
    let sql = format!(
        "SELECT {ENTRY_COLUMNS},
                bm25(knowledge_fts, {w_category}, {w_title}, {w_content}, {w_keywords}) AS score
         FROM knowledge_fts
         JOIN knowledge_entries e ON e.id = knowledge_fts.rowid
         WHERE knowledge_fts MATCH ?1 AND e.is_active = 1
         ORDER BY score, e.id
         LIMIT ?2"
    );
    let index_err = |e: rusqlite::Error| StorageError::IndexUnavailable {
        reason: e.to_string(),
    };

    let mut stmt = conn.prepare(&sql).map_err(index_err)?;
    let rows = stmt
        .query_map(params![query, limit as i64], |row| {
            let bm25: f64 = row.get(11)?;
            Ok((parse_entry_row(row), bm25))
        })
        .map_err(index_err)?;

    let mut results = Vec::new();
    for row in rows {
        let (entry, bm25) = row.map_err(index_err)?;
        // bm25() is negative for matches; it only approaches 0 when every
        // row matches, so keep the score strictly positive.
        results.push((entry?, (-bm25).max(f64::EPSILON)));
    }
    Ok(results)
}

/// Rebuild the FTS5 projection from `knowledge_entries`.
pub fn rebuild_index(conn: &Connection) -> KbResult<()> {
    conn.execute(
        "INSERT INTO knowledge_fts(knowledge_fts) VALUES ('rebuild')",
        [],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
