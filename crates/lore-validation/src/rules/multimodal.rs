//! Agreement between a finding's modalities and the query that surfaced it.

use lore_core::config::FusionWeights;
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{RawFinding, RuleKind, RuleOutcome};
use lore_core::similarity::similarity;

/// Normalised fused similarity `(wt·text + wv·visual) / (wt + wv)`.
///
/// Applies only when the finding and its query both carry text and visual
/// embeddings; otherwise scores 1.0 and passes.
pub fn check(
    finding: &RawFinding,
    weights: &FusionWeights,
    floor: f64,
) -> LoreResult<RuleOutcome> {
    let pairs = match (&finding.embeddings.text, &finding.embeddings.visual, &finding.query) {
        (Some(text), Some(visual), Some(query)) => match (&query.text, &query.visual) {
            (Some(qt), Some(qv)) => Some(((text, qt), (visual, qv))),
            _ => None,
        },
        _ => None,
    };
    let Some(((text, qt), (visual, qv))) = pairs else {
        return Ok(RuleOutcome {
            rule: RuleKind::MultimodalConsistency,
            score: 1.0,
            passed: true,
            applicable: false,
            detail: None,
        });
    };

    for (context, a, b) in [("text", text, qt), ("visual", visual, qv)] {
        if a.len() != b.len() {
            return Err(LoreError::DimensionMismatch {
                context: format!("finding {} {context} embedding vs query", finding.id),
                expected: b.len(),
                actual: a.len(),
            });
        }
    }

    let total = weights.text + weights.visual;
    let fused = if total > 0.0 {
        (weights.text * similarity(text, qt) + weights.visual * similarity(visual, qv)) / total
    } else {
        0.0
    };
    let passed = fused >= floor;
    Ok(RuleOutcome {
        rule: RuleKind::MultimodalConsistency,
        score: fused,
        passed,
        applicable: true,
        detail: (!passed).then(|| format!("fused similarity {fused:.2} below {floor:.2}")),
    })
}
