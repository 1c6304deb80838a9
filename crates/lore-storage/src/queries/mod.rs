//! SQL against the hybrid store schema. Every function takes a borrowed
//! connection; transactions are opened by the callers that need them.

pub mod entity_ops;
pub mod relationship_ops;
pub mod vector_search;
pub mod version_ops;

use lore_core::errors::{LoreResult, StorageError};
use lore_core::models::Entity;

/// Convert f32 slice to bytes (little-endian).
pub(crate) fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to an f32 vec.
pub(crate) fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Decode a stored entity body.
pub(crate) fn parse_body(id: &str, body: &str) -> LoreResult<Entity> {
    serde_json::from_str(body).map_err(|e| {
        StorageError::CorruptRow {
            id: id.to_string(),
            details: e.to_string(),
        }
        .into()
    })
}
