//! # lore-storage
//!
//! SQLite-backed hybrid store. One entity-id space serves two indexes:
//! the vector-similarity index (`IKnowledgeStore`) and the relationship
//! adjacency index (`IGraphStore`).

pub mod boundary;
pub mod engine;
pub mod leases;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;
pub use leases::{WriteLease, WriteLeases};
pub use queries::version_ops::EntityVersion;

use lore_core::errors::{LoreError, StorageError};

/// Wrap a driver error message as a storage error.
pub(crate) fn to_storage_err(message: String) -> LoreError {
    LoreError::StorageError(StorageError::SqliteError { message })
}
