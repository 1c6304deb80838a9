use chrono::{DateTime, Utc};

use lore_core::models::{RawFinding, RuleKind, RuleOutcome};

/// Linear decay from 1.0 at publication to 0 at `max_age_days`.
/// Findings without a publication date are not assessed.
pub fn check(finding: &RawFinding, max_age_days: u32, now: DateTime<Utc>) -> RuleOutcome {
    let Some(published) = finding.source.published_at else {
        return RuleOutcome {
            rule: RuleKind::TemporalRelevance,
            score: 1.0,
            passed: true,
            applicable: false,
            detail: None,
        };
    };
    let age_days = (now - published).num_days().max(0) as f64;
    let max = f64::from(max_age_days.max(1));
    let score = (1.0 - age_days / max).max(0.0);
    let passed = age_days <= max;
    RuleOutcome {
        rule: RuleKind::TemporalRelevance,
        score,
        passed,
        applicable: true,
        detail: (!passed).then(|| format!("{age_days:.0} days old, limit {max_age_days}")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::rules::test_support::finding_with_content;

    #[test]
    fn decays_with_age() {
        let now = Utc::now();
        let mut f = finding_with_content("x");
        f.source.published_at = Some(now - Duration::days(73));
        let outcome = check(&f, 365, now);
        assert!((outcome.score - 0.8).abs() < 1e-9);
        assert!(outcome.passed);

        f.source.published_at = Some(now - Duration::days(400));
        let stale = check(&f, 365, now);
        assert_eq!(stale.score, 0.0);
        assert!(!stale.passed);
    }

    #[test]
    fn undated_sources_are_not_applicable() {
        let outcome = check(&finding_with_content("x"), 365, Utc::now());
        assert!(!outcome.applicable);
        assert!(outcome.passed);
    }
}
