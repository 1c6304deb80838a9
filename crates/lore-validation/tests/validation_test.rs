mod common;

use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, Utc};

use lore_core::config::ValidationConfig;
use lore_core::errors::LoreError;
use lore_core::models::{Decision, EmbeddingPair, RuleKind};
use lore_core::traits::IValidator;
use lore_core::Deadline;
use lore_validation::ValidationEngine;

use common::*;

#[test]
fn scenario_c_strong_finding_is_accepted() {
    let engine = ValidationEngine::default();
    let f = finding("c", 0.9, 0.9, 500);
    assert_eq!(f.content.chars().count(), 500);

    let result = engine.validate(&f, Deadline::none()).unwrap();
    assert_eq!(result.decision, Decision::Accept);
    assert!(result.aggregate_score >= 0.7);
    assert_eq!(result.hard_failures().count(), 0);
    assert_eq!(result.finding_id, "c");
}

#[test]
fn scenario_d_weak_source_is_rejected_by_hard_gate() {
    let engine = ValidationEngine::default();
    let result = engine
        .validate(&finding("d", 0.2, 0.9, 500), Deadline::none())
        .unwrap();

    assert_eq!(result.decision, Decision::Reject);
    assert!(result.aggregate_score >= 0.7, "aggregate alone would pass");
    let failures: Vec<RuleKind> = result.hard_failures().map(|o| o.rule).collect();
    assert_eq!(failures, vec![RuleKind::SourceReliability]);
}

#[test]
fn short_content_is_rejected_by_hard_gate() {
    let result = ValidationEngine::default()
        .validate(&finding("short", 0.9, 0.9, 20), Deadline::none())
        .unwrap();
    assert_eq!(result.decision, Decision::Reject);
    assert!(result.outcome(RuleKind::ContentQuality).unwrap().hard_failed());
}

#[test]
fn low_aggregate_rejects_without_hard_failure() {
    let mut config = ValidationConfig::default();
    config.min_overall_score = 0.95;
    let result = ValidationEngine::new(config)
        .validate(&finding("mid", 0.6, 0.6, 60), Deadline::none())
        .unwrap();
    assert_eq!(result.hard_failures().count(), 0);
    assert_eq!(result.decision, Decision::Reject);
}

#[test]
fn battery_reports_each_rule_once() {
    let result = ValidationEngine::default()
        .validate(&finding("f", 0.9, 0.9, 200), Deadline::none())
        .unwrap();
    let rules: Vec<RuleKind> = result.outcomes.iter().map(|o| o.rule).collect();
    assert_eq!(
        rules,
        vec![
            RuleKind::ContentQuality,
            RuleKind::SourceReliability,
            RuleKind::InternalConsistency,
            RuleKind::MultimodalConsistency,
            RuleKind::LinguisticQuality,
        ]
    );
    assert!(!result.outcome(RuleKind::MultimodalConsistency).unwrap().applicable);
}

#[test]
fn multimodal_mismatch_lowers_score() {
    let mut f = finding("mm", 0.9, 0.9, 500);
    f.embeddings = EmbeddingPair::both(vec![1.0, 0.0, 0.0], vec![0.0, 1.0]);
    f.query = Some(EmbeddingPair::both(vec![1.0, 0.0, 0.0], vec![1.0, 0.0]));
    let result = ValidationEngine::default()
        .validate(&f, Deadline::none())
        .unwrap();
    let outcome = result.outcome(RuleKind::MultimodalConsistency).unwrap();
    assert!(outcome.applicable);
    assert!((outcome.score - 0.6).abs() < 1e-9);
    assert!(outcome.passed, "0.6 clears the default 0.5 floor");
}

#[test]
fn temporal_rule_runs_only_when_enabled() {
    let mut f = finding("old", 0.9, 0.9, 500);
    f.source.published_at = Some(Utc::now() - ChronoDuration::days(730));

    let default = ValidationEngine::default()
        .validate(&f, Deadline::none())
        .unwrap();
    assert!(default.outcome(RuleKind::TemporalRelevance).is_none());

    let mut config = ValidationConfig::default();
    config.temporal.enabled = true;
    let result = ValidationEngine::new(config)
        .validate(&f, Deadline::none())
        .unwrap();
    let temporal = result.outcome(RuleKind::TemporalRelevance).unwrap();
    assert!(!temporal.passed);
    assert_eq!(temporal.score, 0.0);
    assert!(!temporal.hard_failed());
}

#[test]
fn confidence_is_priority_weighted() {
    let result = ValidationEngine::default()
        .validate(&finding("w", 0.5, 0.5, 500), Deadline::none())
        .unwrap();
    // content 1.0 (w 1), source 0.5 (w 1/2), consistency 0.5 (w 1/3),
    // multimodal 1.0 (w 1/3), linguistic 1.0 (w 1/4)
    let expected = (1.0 + 0.25 + 0.5 / 3.0 + 1.0 / 3.0 + 0.25) / (1.0 + 0.5 + 2.0 / 3.0 + 0.25);
    assert!((result.confidence - expected).abs() < 1e-9);
}

#[test]
fn out_of_range_scores_are_invalid() {
    let engine = ValidationEngine::default();
    for (evidence, novelty) in [(1.2, 0.5), (0.5, -0.1), (f64::NAN, 0.5)] {
        assert!(matches!(
            engine.validate(&finding("bad", evidence, novelty, 500), Deadline::none()),
            Err(LoreError::InvalidArgument { .. })
        ));
    }
    assert!(matches!(
        engine.validate(&finding(" ", 0.5, 0.5, 500), Deadline::none()),
        Err(LoreError::InvalidArgument { .. })
    ));
}

#[test]
fn batch_preserves_order() {
    let findings: Vec<_> = (0..40)
        .map(|i| finding(&format!("f{i:02}"), (i % 10) as f64 / 10.0, 0.5, 100 + i))
        .collect();
    let results = ValidationEngine::default()
        .validate_batch(&findings, Deadline::none())
        .unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.finding_id.as_str()).collect();
    let expected: Vec<&str> = findings.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, expected);
    assert!(results.iter().any(|r| r.is_accepted()));
    assert!(results.iter().any(|r| !r.is_accepted()));
}

#[test]
fn validate_findings_pairs_results() {
    let findings = vec![finding("a", 0.9, 0.9, 500), finding("b", 0.1, 0.9, 500)];
    let validated = ValidationEngine::default()
        .validate_findings(findings, Deadline::none())
        .unwrap();
    assert_eq!(validated[0].finding.id, validated[0].result.finding_id);
    assert!(validated[0].result.is_accepted());
    assert!(!validated[1].result.is_accepted());
}

#[test]
fn expired_deadline_times_out() {
    let deadline = Deadline::at(Instant::now() - Duration::from_millis(1));
    let engine = ValidationEngine::default();
    assert!(matches!(
        engine.validate(&finding("t", 0.9, 0.9, 500), deadline),
        Err(LoreError::Timeout { .. })
    ));
    assert!(matches!(
        engine.validate_batch(&[finding("t", 0.9, 0.9, 500)], deadline),
        Err(LoreError::Timeout { .. })
    ));
}
