mod embedding_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use storage_error::StorageError;

/// Top-level error type for the lore knowledge engine.
#[derive(Debug, thiserror::Error)]
pub enum LoreError {
    /// An embedding does not match the dimension declared for its modality.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("entity not found: {id}")]
    NotFound { id: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("deadline exceeded during {operation}")]
    Timeout { operation: String },

    /// Another writer currently holds the lease for this id.
    #[error("write conflict on {id}: another writer holds the lease")]
    WriteConflict { id: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

impl LoreError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Whether re-issuing the same call may succeed.
    ///
    /// All store operations are idempotent at the entity level, so a timed-out
    /// or conflicting call can be retried as a whole.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::WriteConflict { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type LoreResult<T> = Result<T, LoreError>;
