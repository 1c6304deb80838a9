//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use lore_core::config::StorageConfig;
use lore_core::errors::LoreResult;

use crate::to_storage_err;

/// Pragmas for the writer. `synchronous = FULL` so a returned upsert has
/// reached disk.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> LoreResult<()> {
    let journal = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal};
        PRAGMA synchronous = FULL;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read-only connections.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> LoreResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA busy_timeout = {};
        PRAGMA query_only = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> LoreResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
