//! v004: superseded entity bodies, retained for provenance.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entity_versions (
            id             TEXT NOT NULL REFERENCES entities(id),
            version        INTEGER NOT NULL,
            body           TEXT NOT NULL,
            content_hash   TEXT NOT NULL,
            superseded_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (id, version)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
