//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use lore_core::config::StorageConfig;
use lore_core::errors::LoreResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// Absent in in-memory mode, where every read goes through the writer.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    ///
    /// The writer opens (and creates) the file first so readers can attach
    /// read-only.
    pub fn open(path: &Path, config: &StorageConfig) -> LoreResult<Self> {
        let writer = WriteConnection::open(path, config)?;
        let readers = ReadPool::open(path, config)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database. Separate in-memory connections would be
    /// separate databases, so there is no read pool.
    pub fn open_in_memory(config: &StorageConfig) -> LoreResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory(config)?,
            readers: None,
            db_path: None,
        })
    }
}
