//! v002: embeddings as little-endian f32 blobs, one row per vector.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vectors (
            entity_id   TEXT NOT NULL REFERENCES entities(id),
            modality    TEXT NOT NULL,
            position    INTEGER NOT NULL,
            dimensions  INTEGER NOT NULL,
            embedding   BLOB NOT NULL,
            PRIMARY KEY (entity_id, modality, position)
        );

        CREATE INDEX IF NOT EXISTS idx_vectors_modality ON vectors(modality);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
