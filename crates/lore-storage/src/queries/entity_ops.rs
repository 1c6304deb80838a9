//! Entity insert, versioning and point lookup.

use rusqlite::{params, Connection, OptionalExtension};

use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{Entity, KnowledgeFragment, KnowledgeItem, Modality, VideoFrame};

use super::{f32_vec_to_bytes, parse_body};
use crate::to_storage_err;

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    /// The previous body was retained; the entity is now at this version.
    Versioned(u32),
    /// Same content as the stored version; nothing written.
    Unchanged,
}

/// Insert or version an entity in a single transaction.
pub fn upsert_entity(conn: &Connection, entity: &Entity) -> LoreResult<UpsertOutcome> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let outcome = upsert_entity_inner(&tx, entity)?;
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(outcome)
}

fn upsert_entity_inner(conn: &Connection, entity: &Entity) -> LoreResult<UpsertOutcome> {
    let id = entity.id();
    let kind = entity.kind();
    let body = serde_json::to_string(entity)?;
    let content_hash = blake3::hash(body.as_bytes()).to_hex().to_string();

    let existing: Option<(String, u32, String, String)> = conn
        .query_row(
            "SELECT kind, version, content_hash, body FROM entities WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    if let Some((stored_kind, _, stored_hash, _)) = &existing {
        if stored_kind != kind.as_str() {
            return Err(LoreError::invalid(format!(
                "id {id} already belongs to a {stored_kind}, cannot store a {kind}"
            )));
        }
        if *stored_hash == content_hash {
            return Ok(UpsertOutcome::Unchanged);
        }
    }

    check_references(conn, entity)?;

    let created_at = entity.created_at().to_rfc3339();
    let outcome = match existing {
        Some((_, version, old_hash, old_body)) => {
            conn.execute(
                "INSERT INTO entity_versions (id, version, body, content_hash)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, version, old_body, old_hash],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            let next = version + 1;
            conn.execute(
                "UPDATE entities
                 SET version = ?2, body = ?3, content_hash = ?4, created_at = ?5,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?1",
                params![id, next, body, content_hash, created_at],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            UpsertOutcome::Versioned(next)
        }
        None => {
            conn.execute(
                "INSERT INTO entities (id, kind, version, body, content_hash, created_at)
                 VALUES (?1, ?2, 1, ?3, ?4, ?5)",
                params![id, kind.as_str(), body, content_hash, created_at],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            UpsertOutcome::Inserted
        }
    };

    write_index_row(conn, entity, &created_at)?;
    write_vectors(conn, &id, entity)?;
    Ok(outcome)
}

/// Parents and endpoints must already exist.
fn check_references(conn: &Connection, entity: &Entity) -> LoreResult<()> {
    match entity {
        Entity::Item(item) => {
            for citation_id in &item.citations {
                if !exists(conn, "SELECT 1 FROM citations WHERE id = ?1", citation_id)? {
                    return Err(LoreError::not_found(citation_id.clone()));
                }
            }
        }
        Entity::Fragment(fragment) => {
            let parent_type: Option<String> = conn
                .query_row(
                    "SELECT content_type FROM items WHERE id = ?1",
                    params![fragment.item_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| to_storage_err(e.to_string()))?;
            match parent_type {
                None => return Err(LoreError::not_found(fragment.item_id.clone())),
                Some(t) if t != fragment.content_type.as_str() => {
                    return Err(LoreError::invalid(format!(
                        "fragment {} is {} but its item {} is {t}",
                        fragment.id, fragment.content_type, fragment.item_id
                    )));
                }
                Some(_) => {}
            }
        }
        Entity::Frame(frame) => {
            if !exists(conn, "SELECT 1 FROM fragments WHERE id = ?1", &frame.fragment_id)? {
                return Err(LoreError::not_found(frame.fragment_id.clone()));
            }
        }
        Entity::Relationship(rel) => {
            for endpoint in [&rel.source_id, &rel.target_id] {
                if !exists(conn, GRAPH_NODE_SQL, endpoint)? {
                    return Err(LoreError::not_found(endpoint.clone()));
                }
            }
        }
        Entity::Citation(_) | Entity::Synthesized(_) => {}
    }
    Ok(())
}

const GRAPH_NODE_SQL: &str = "SELECT 1 FROM items WHERE id = ?1
     UNION ALL SELECT 1 FROM synthesized WHERE id = ?1";

fn exists(conn: &Connection, sql: &str, id: &str) -> LoreResult<bool> {
    conn.query_row(sql, params![id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(|e| to_storage_err(e.to_string()))
}

fn write_index_row(conn: &Connection, entity: &Entity, created_at: &str) -> LoreResult<()> {
    let result = match entity {
        Entity::Item(KnowledgeItem {
            id,
            concept,
            content_type,
            evidence_score,
            ..
        }) => conn.execute(
            "INSERT INTO items (id, concept, content_type, evidence_score, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                concept = excluded.concept,
                content_type = excluded.content_type,
                evidence_score = excluded.evidence_score,
                created_at = excluded.created_at",
            params![id, concept, content_type.as_str(), evidence_score, created_at],
        ),
        Entity::Fragment(KnowledgeFragment {
            id,
            item_id,
            content_type,
            confidence,
            start_time,
            end_time,
            scene_change,
            ..
        }) => conn.execute(
            "INSERT INTO fragments
                (id, item_id, content_type, confidence, start_time, end_time, scene_change, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                item_id = excluded.item_id,
                content_type = excluded.content_type,
                confidence = excluded.confidence,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                scene_change = excluded.scene_change,
                created_at = excluded.created_at",
            params![
                id,
                item_id,
                content_type.as_str(),
                confidence,
                start_time,
                end_time,
                scene_change,
                created_at
            ],
        ),
        Entity::Frame(VideoFrame {
            id,
            fragment_id,
            timestamp,
            scene_score,
            ..
        }) => conn.execute(
            "INSERT INTO frames (id, fragment_id, timestamp, scene_score, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                fragment_id = excluded.fragment_id,
                timestamp = excluded.timestamp,
                scene_score = excluded.scene_score,
                created_at = excluded.created_at",
            params![id, fragment_id, timestamp, scene_score, created_at],
        ),
        Entity::Citation(citation) => conn.execute(
            "INSERT INTO citations (id, source_url, accessed_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                source_url = excluded.source_url,
                accessed_at = excluded.accessed_at",
            params![citation.id, citation.source_url, created_at],
        ),
        Entity::Relationship(rel) => conn.execute(
            "INSERT INTO relationships
                (edge_id, source_id, target_id, relation_type, similarity, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(source_id, target_id) DO UPDATE SET
                relation_type = excluded.relation_type,
                similarity = excluded.similarity,
                created_at = excluded.created_at",
            params![
                rel.id(),
                rel.source_id,
                rel.target_id,
                rel.relation_type.as_str(),
                rel.similarity,
                created_at
            ],
        ),
        Entity::Synthesized(s) => conn.execute(
            "INSERT INTO synthesized (id, content_type, confidence, created_at, concept)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                content_type = excluded.content_type,
                confidence = excluded.confidence,
                created_at = excluded.created_at,
                concept = excluded.concept",
            params![
                s.id,
                s.content_type.as_str(),
                s.confidence,
                created_at,
                s.concept()
            ],
        ),
    };
    result.map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Replace the indexed vectors of an entity.
fn write_vectors(conn: &Connection, id: &str, entity: &Entity) -> LoreResult<()> {
    conn.execute("DELETE FROM vectors WHERE entity_id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;

    let vectors: Vec<(Modality, &[f32])> = match entity {
        Entity::Item(item) => vec![(Modality::Text, item.embedding.as_slice())],
        Entity::Fragment(fragment) => std::iter::once((Modality::Text, fragment.embedding.as_slice()))
            .chain(
                fragment
                    .visual_embeddings
                    .iter()
                    .map(|v| (Modality::Visual, v.as_slice())),
            )
            .collect(),
        Entity::Frame(frame) => vec![(Modality::Visual, frame.embedding.as_slice())],
        Entity::Synthesized(s) if !s.embedding.is_empty() => {
            vec![(Modality::Text, s.embedding.as_slice())]
        }
        _ => Vec::new(),
    };

    let mut stmt = conn
        .prepare(
            "INSERT INTO vectors (entity_id, modality, position, dimensions, embedding)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut positions = [0i64; 2];
    for (modality, vector) in vectors {
        let slot = match modality {
            Modality::Text => 0,
            Modality::Visual => 1,
        };
        stmt.execute(params![
            id,
            modality_name(modality),
            positions[slot],
            vector.len() as i64,
            f32_vec_to_bytes(vector)
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
        positions[slot] += 1;
    }
    Ok(())
}

pub(crate) fn modality_name(modality: Modality) -> &'static str {
    match modality {
        Modality::Text => "text",
        Modality::Visual => "visual",
    }
}

/// Latest version of an entity.
pub fn get_entity(conn: &Connection, id: &str) -> LoreResult<Option<Entity>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM entities WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    body.map(|b| parse_body(id, &b)).transpose()
}

/// Current version number of an entity.
pub fn version_of(conn: &Connection, id: &str) -> LoreResult<Option<u32>> {
    conn.query_row(
        "SELECT version FROM entities WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Number of stored entities of each kind, for diagnostics.
pub fn count_by_kind(conn: &Connection) -> LoreResult<Vec<(String, i64)>> {
    let mut stmt = conn
        .prepare("SELECT kind, COUNT(*) FROM entities GROUP BY kind ORDER BY kind")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
