use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{LoreError, LoreResult};
use crate::models::Modality;

/// Declared embedding dimensions for this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub text_dimensions: usize,
    pub visual_dimensions: usize,
}

impl EmbeddingConfig {
    pub fn dimensions(&self, modality: Modality) -> usize {
        match modality {
            Modality::Text => self.text_dimensions,
            Modality::Visual => self.visual_dimensions,
        }
    }

    /// Reject a vector whose length differs from the declared dimension.
    pub fn check(&self, modality: Modality, context: &str, vector: &[f32]) -> LoreResult<()> {
        let expected = self.dimensions(modality);
        if vector.len() != expected {
            return Err(LoreError::DimensionMismatch {
                context: context.to_string(),
                expected,
                actual: vector.len(),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(LoreError::invalid(format!(
                "{context} contains a non-finite component"
            )));
        }
        Ok(())
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            text_dimensions: defaults::DEFAULT_TEXT_DIMENSIONS,
            visual_dimensions: defaults::DEFAULT_VISUAL_DIMENSIONS,
        }
    }
}
