use lore_core::errors::*;

#[test]
fn not_found_carries_id() {
    let err = LoreError::not_found("item-42");
    assert!(err.to_string().contains("item-42"));
    assert!(!err.is_retryable());
}

#[test]
fn dimension_mismatch_carries_values() {
    let err = LoreError::DimensionMismatch {
        context: "fragment text embedding".into(),
        expected: 384,
        actual: 12,
    };
    let msg = err.to_string();
    assert!(msg.contains("384"));
    assert!(msg.contains("12"));
    assert!(msg.contains("fragment text embedding"));
}

#[test]
fn timeout_and_write_conflict_are_retryable() {
    assert!(LoreError::timeout("traversal").is_retryable());
    assert!(LoreError::WriteConflict { id: "x".into() }.is_retryable());
    assert!(!LoreError::invalid("limit must be positive").is_retryable());
}

#[test]
fn storage_error_converts_into_lore_error() {
    let err: LoreError = StorageError::SqliteError {
        message: "disk I/O error".into(),
    }
    .into();
    assert!(matches!(err, LoreError::StorageError(_)));
    assert!(err.to_string().contains("disk I/O error"));
}

#[test]
fn embedding_error_converts_into_lore_error() {
    let err: LoreError = EmbeddingError::ProviderUnavailable {
        provider: "clip".into(),
    }
    .into();
    assert!(err.to_string().contains("clip"));
}

#[test]
fn serde_error_converts_into_lore_error() {
    let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: LoreError = parse.into();
    assert!(matches!(err, LoreError::SerializationError(_)));
}
