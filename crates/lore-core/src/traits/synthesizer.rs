use crate::deadline::Deadline;
use crate::errors::LoreResult;
use crate::models::{SynthesizedEntity, ValidatedFinding};

/// Merges validated findings into knowledge entities.
pub trait ISynthesizer: Send + Sync {
    fn synthesize(
        &self,
        findings: &[ValidatedFinding],
        deadline: Deadline,
    ) -> LoreResult<Vec<SynthesizedEntity>>;
}
