use lore_core::models::{RawFinding, RuleKind, RuleOutcome};

/// Flags claims that are neither supported nor novel.
pub fn check(finding: &RawFinding, floor: f64) -> RuleOutcome {
    let evidence = finding.evidence_score;
    let novelty = finding.novelty_score;
    let passed = !(evidence < floor && novelty < floor);
    RuleOutcome {
        rule: RuleKind::InternalConsistency,
        score: evidence.max(novelty),
        passed,
        applicable: true,
        detail: (!passed)
            .then(|| format!("evidence {evidence:.2} and novelty {novelty:.2} below {floor:.2}")),
    }
}
