//! Retained versions of superseded entities.

use rusqlite::{params, Connection};

use lore_core::errors::LoreResult;
use lore_core::models::Entity;

use super::parse_body;
use crate::to_storage_err;

/// A superseded body and when it was replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityVersion {
    pub version: u32,
    pub entity: Entity,
    pub superseded_at: String,
}

/// Retained versions of an entity, oldest first. The live version is not included.
pub fn history(conn: &Connection, id: &str) -> LoreResult<Vec<EntityVersion>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT version, body, superseded_at
             FROM entity_versions
             WHERE id = ?1
             ORDER BY version ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![id], |row| {
            Ok((
                row.get::<_, u32>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut versions = Vec::new();
    for row in rows {
        let (version, body, superseded_at) = row.map_err(|e| to_storage_err(e.to_string()))?;
        versions.push(EntityVersion {
            version,
            entity: parse_body(id, &body)?,
            superseded_at,
        });
    }
    Ok(versions)
}
