use crate::deadline::Deadline;
use crate::errors::LoreResult;
use crate::models::{RawFinding, ValidationResult};

/// Quality gate for raw findings. Never mutates store state.
pub trait IValidator: Send + Sync {
    fn validate(&self, finding: &RawFinding, deadline: Deadline) -> LoreResult<ValidationResult>;
}
