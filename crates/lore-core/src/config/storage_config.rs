use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::ContentType;

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: String,
    /// Enable WAL journal mode.
    pub wal_mode: bool,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
    /// Number of read connections in the pool.
    pub read_pool_size: usize,
    /// Extension keys that must be present on items of a content type,
    /// keyed by the content type's name (e.g. `video = ["channel"]`).
    pub required_extensions: BTreeMap<String, Vec<String>>,
}

impl StorageConfig {
    /// Required extension keys for one content type.
    pub fn required_extensions_for(&self, content_type: ContentType) -> &[String] {
        self.required_extensions
            .get(content_type.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            wal_mode: defaults::DEFAULT_WAL_MODE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            required_extensions: BTreeMap::new(),
        }
    }
}
