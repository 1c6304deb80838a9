use lore_core::models::{RawFinding, RuleKind, RuleOutcome};

/// The evidence score is the reliability score; the floor is a hard gate.
pub fn check(finding: &RawFinding, floor: f64) -> RuleOutcome {
    let passed = finding.evidence_score >= floor;
    RuleOutcome {
        rule: RuleKind::SourceReliability,
        score: finding.evidence_score,
        passed,
        applicable: true,
        detail: (!passed).then(|| {
            format!(
                "evidence {:.2} below floor {floor:.2} ({})",
                finding.evidence_score, finding.source.source_ref
            )
        }),
    }
}
