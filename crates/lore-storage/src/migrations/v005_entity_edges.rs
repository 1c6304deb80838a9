//! Relationship endpoints may be synthesized entities as well as items.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE relationships_v5 (
            edge_id        TEXT NOT NULL UNIQUE REFERENCES entities(id),
            source_id      TEXT NOT NULL REFERENCES entities(id),
            target_id      TEXT NOT NULL REFERENCES entities(id),
            relation_type  TEXT NOT NULL,
            similarity     REAL NOT NULL,
            created_at     TEXT NOT NULL,
            PRIMARY KEY (source_id, target_id),
            CHECK (source_id <> target_id),
            CHECK (similarity >= 0.0 AND similarity <= 1.0)
        );

        INSERT INTO relationships_v5
            (edge_id, source_id, target_id, relation_type, similarity, created_at)
        SELECT edge_id, source_id, target_id, relation_type, similarity, created_at
        FROM relationships;

        DROP TABLE relationships;
        ALTER TABLE relationships_v5 RENAME TO relationships;
        CREATE INDEX IF NOT EXISTS idx_relationships_target ON relationships(target_id);

        ALTER TABLE synthesized ADD COLUMN concept TEXT;
        UPDATE synthesized SET concept = COALESCE(
            (SELECT json_extract(e.body, '$.data.topics[0]')
             FROM entities e WHERE e.id = synthesized.id),
            id
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
