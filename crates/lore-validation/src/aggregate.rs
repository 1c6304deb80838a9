//! Folding rule outcomes into a decision.

use lore_core::models::{Decision, RuleOutcome};

/// Mean of rule scores. Zero for no outcomes.
pub fn aggregate_score(outcomes: &[RuleOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    outcomes.iter().map(|o| o.score).sum::<f64>() / outcomes.len() as f64
}

/// Mean of rule scores weighted by `1 / priority`.
pub fn weighted_confidence(outcomes: &[RuleOutcome]) -> f64 {
    let (sum, weight) = outcomes.iter().fold((0.0, 0.0), |(sum, weight), o| {
        let w = 1.0 / f64::from(o.rule.priority());
        (sum + o.score * w, weight + w)
    });
    if weight > 0.0 {
        (sum / weight).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Accept iff the aggregate reaches `min_overall` and no hard gate failed.
pub fn decide(outcomes: &[RuleOutcome], aggregate: f64, min_overall: f64) -> Decision {
    if aggregate >= min_overall && !outcomes.iter().any(RuleOutcome::hard_failed) {
        Decision::Accept
    } else {
        Decision::Reject
    }
}
