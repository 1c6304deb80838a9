//! Versioned schema migrations. Each runs once, in order, inside its own
//! transaction, and records itself in `schema_version`.

mod v001_entities;
mod v002_vector_index;
mod v003_relationships;
mod v004_versions;
mod v005_entity_edges;

use rusqlite::{params, Connection};
use tracing::info;

use lore_core::errors::{LoreResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> LoreResult<()>;

const MIGRATIONS: [(u32, Migration); 5] = [
    (1, v001_entities::migrate),
    (2, v002_vector_index::migrate),
    (3, v003_relationships::migrate),
    (4, v004_versions::migrate),
    (5, v005_entity_edges::migrate),
];

/// Latest schema version known to this build.
pub const LATEST_VERSION: u32 = 5;

/// Apply every migration newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> LoreResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version: *version,
            reason: e.to_string(),
        })?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        info!(version, "applied schema migration");
    }
    current_version(conn)
}

/// Highest applied migration, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> LoreResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
