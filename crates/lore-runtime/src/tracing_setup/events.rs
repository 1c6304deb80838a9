//! Structured log events for pipeline milestones.

pub fn findings_validated(request_id: &str, total: usize, accepted: usize) {
    tracing::info!(
        event = "findings_validated",
        request_id = %request_id,
        total,
        accepted,
        rejected = total - accepted,
        "findings validated"
    );
}

pub fn entities_synthesized(request_id: &str, entities: usize, persisted: usize) {
    tracing::info!(
        event = "entities_synthesized",
        request_id = %request_id,
        entities,
        persisted,
        "entities synthesized"
    );
}

pub fn operation_timed_out(operation: &str, elapsed_ms: u128) {
    tracing::warn!(
        event = "operation_timed_out",
        operation = %operation,
        elapsed_ms = elapsed_ms as u64,
        "operation exceeded its deadline"
    );
}
