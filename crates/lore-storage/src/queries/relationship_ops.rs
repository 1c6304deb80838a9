//! Adjacency lookups over the relationship graph.

use rusqlite::{params, Connection, OptionalExtension};

use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{Entity, Relationship, VideoFrame};

use super::parse_body;
use crate::to_storage_err;

/// Outgoing edges of a node, strongest first, then by target id.
pub fn edges_from(conn: &Connection, node_id: &str) -> LoreResult<Vec<Relationship>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT e.id, e.body
             FROM relationships r
             JOIN entities e ON e.id = r.edge_id
             WHERE r.source_id = ?1
             ORDER BY r.similarity DESC, r.target_id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![node_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut edges = Vec::new();
    for row in rows {
        let (id, body) = row.map_err(|e| to_storage_err(e.to_string()))?;
        match parse_body(&id, &body)? {
            Entity::Relationship(rel) => edges.push(rel),
            other => {
                return Err(LoreError::invalid(format!(
                    "edge row {id} holds a {}",
                    other.kind()
                )))
            }
        }
    }
    Ok(edges)
}

/// Ids of items carrying a concept label.
pub fn items_with_concept(conn: &Connection, concept: &str) -> LoreResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT id FROM items WHERE concept = ?1 ORDER BY id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![concept], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<String>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Concept label of a graph node: an item's concept, or a synthesized
/// entity's first topic.
pub fn node_concept(conn: &Connection, node_id: &str) -> LoreResult<Option<String>> {
    conn.query_row(
        "SELECT concept FROM items WHERE id = ?1
         UNION ALL
         SELECT COALESCE(concept, id) FROM synthesized WHERE id = ?1
         LIMIT 1",
        params![node_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Frames of a fragment by timestamp.
pub fn frames_for_fragment(conn: &Connection, fragment_id: &str) -> LoreResult<Vec<VideoFrame>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT e.id, e.body
             FROM frames fr
             JOIN entities e ON e.id = fr.id
             WHERE fr.fragment_id = ?1
             ORDER BY fr.timestamp ASC, fr.id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![fragment_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut frames = Vec::new();
    for row in rows {
        let (id, body) = row.map_err(|e| to_storage_err(e.to_string()))?;
        frames.push(parse_body(&id, &body)?.into_frame()?);
    }
    Ok(frames)
}

/// Whether a fragment exists.
pub fn fragment_exists(conn: &Connection, fragment_id: &str) -> LoreResult<bool> {
    conn.query_row(
        "SELECT 1 FROM fragments WHERE id = ?1",
        params![fragment_id],
        |_| Ok(()),
    )
    .optional()
    .map(|r| r.is_some())
    .map_err(|e| to_storage_err(e.to_string()))
}
