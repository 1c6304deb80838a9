//! v001: entity registry plus per-kind index tables.

use rusqlite::Connection;

use lore_core::errors::LoreResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entities (
            id            TEXT PRIMARY KEY,
            kind          TEXT NOT NULL,
            version       INTEGER NOT NULL DEFAULT 1,
            body          TEXT NOT NULL,
            content_hash  TEXT NOT NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_entities_kind ON entities(kind);

        CREATE TABLE IF NOT EXISTS items (
            id              TEXT PRIMARY KEY REFERENCES entities(id),
            concept         TEXT NOT NULL,
            content_type    TEXT NOT NULL,
            evidence_score  REAL NOT NULL,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_items_concept ON items(concept);
        CREATE INDEX IF NOT EXISTS idx_items_content_type ON items(content_type);

        CREATE TABLE IF NOT EXISTS fragments (
            id            TEXT PRIMARY KEY REFERENCES entities(id),
            item_id       TEXT NOT NULL REFERENCES items(id),
            content_type  TEXT NOT NULL,
            confidence    REAL NOT NULL,
            start_time    REAL,
            end_time      REAL,
            scene_change  INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL,
            CHECK (start_time IS NULL OR end_time IS NULL OR start_time <= end_time)
        );

        CREATE INDEX IF NOT EXISTS idx_fragments_item ON fragments(item_id);
        CREATE INDEX IF NOT EXISTS idx_fragments_content_type ON fragments(content_type);

        CREATE TABLE IF NOT EXISTS frames (
            id           TEXT PRIMARY KEY REFERENCES entities(id),
            fragment_id  TEXT NOT NULL REFERENCES fragments(id),
            timestamp    REAL NOT NULL,
            scene_score  REAL NOT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_frames_fragment ON frames(fragment_id);

        CREATE TABLE IF NOT EXISTS citations (
            id           TEXT PRIMARY KEY REFERENCES entities(id),
            source_url   TEXT NOT NULL,
            accessed_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS synthesized (
            id            TEXT PRIMARY KEY REFERENCES entities(id),
            content_type  TEXT NOT NULL,
            confidence    REAL NOT NULL,
            created_at    TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
