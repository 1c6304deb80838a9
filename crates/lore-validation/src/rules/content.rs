use lore_core::models::{RawFinding, RuleKind, RuleOutcome};

/// Characters of trimmed content against `min_len`. Below the minimum is a
/// hard failure; the score saturates at twice the minimum.
pub fn check(finding: &RawFinding, min_len: usize) -> RuleOutcome {
    let len = finding.content.trim().chars().count();
    let passed = len > 0 && len >= min_len;
    let score = if !passed {
        0.0
    } else if min_len == 0 {
        1.0
    } else {
        (len as f64 / (2 * min_len) as f64).min(1.0)
    };
    RuleOutcome {
        rule: RuleKind::ContentQuality,
        score,
        passed,
        applicable: true,
        detail: (!passed).then(|| format!("{len} characters, minimum {min_len}")),
    }
}
