//! v003: relationship adjacency. One edge per ordered pair, no self-loops.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS relationships (
            edge_id        TEXT NOT NULL UNIQUE REFERENCES entities(id),
            source_id      TEXT NOT NULL REFERENCES items(id),
            target_id      TEXT NOT NULL REFERENCES items(id),
            relation_type  TEXT NOT NULL,
            similarity     REAL NOT NULL,
            created_at     TEXT NOT NULL,
            PRIMARY KEY (source_id, target_id),
            CHECK (source_id <> target_id),
            CHECK (similarity >= 0.0 AND similarity <= 1.0)
        );

        CREATE INDEX IF NOT EXISTS idx_relationships_target ON relationships(target_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
