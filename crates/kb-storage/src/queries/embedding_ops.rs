//! Embedding persistence: one little-endian f32 blob per entry.

use rusqlite::{params, Connection};

use kb_core::errors::{KbResult, StorageError};
use kb_core::models::EmbeddingVector;

use crate::to_storage_err;

/// Insert or replace the embedding of one entry.
pub fn store_embedding(conn: &Connection, embedding: &EmbeddingVector) -> KbResult<()> {
    let blob = f32_vec_to_bytes(&embedding.values);
    conn.execute(
        "INSERT INTO entry_embeddings (entry_id, model, dimensions, embedding, content_hash)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(entry_id) DO UPDATE SET
            model = excluded.model,
            dimensions = excluded.dimensions,
            embedding = excluded.embedding,
            content_hash = excluded.content_hash,
            created_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            embedding.entry_id,
            embedding.model,
            embedding.values.len() as i64,
            blob,
            embedding.content_hash,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Load the embeddings of one model for active entries.
pub fn load_embeddings(conn: &Connection, model: &str) -> KbResult<Vec<EmbeddingVector>> {
    let mut stmt = conn
        .prepare(
            "SELECT ee.entry_id, ee.dimensions, ee.embedding, ee.content_hash
             FROM entry_embeddings ee
             JOIN knowledge_entries e ON e.id = ee.entry_id
             WHERE ee.model = ?1 AND e.is_active = 1
             ORDER BY ee.entry_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![model], |row| {
            let entry_id: i64 = row.get(0)?;
            let dimensions: i64 = row.get(1)?;
            let blob: Vec<u8> = row.get(2)?;
            let content_hash: String = row.get(3)?;
            Ok((entry_id, dimensions, blob, content_hash))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (entry_id, dimensions, blob, content_hash) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let values = bytes_to_f32_vec(&blob);
        if values.len() as i64 != dimensions {
            return Err(StorageError::CorruptEmbedding {
                entry_id,
                reason: format!("expected {dimensions} dimensions, blob holds {}", values.len()),
            }
            .into());
        }
        results.push(EmbeddingVector {
            entry_id,
            values,
            model: model.to_string(),
            content_hash,
        });
    }
    Ok(results)
}

pub fn delete_embedding(conn: &Connection, entry_id: i64) -> KbResult<()> {
    conn.execute(
        "DELETE FROM entry_embeddings WHERE entry_id = ?1",
        params![entry_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Convert f32 slice to little-endian bytes.
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert little-endian bytes back to f32s. Trailing partial chunks are dropped.
pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
