#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;

use lore_core::models::Decision;
use lore_core::traits::IValidator;
use lore_core::Deadline;
use lore_validation::ValidationEngine;

use common::finding;

proptest! {
    #[test]
    fn decision_follows_aggregate_and_gates(
        evidence in 0.0f64..=1.0,
        novelty in 0.0f64..=1.0,
        len in 0usize..400,
    ) {
        let engine = ValidationEngine::default();
        let result = engine.validate(&finding("p", evidence, novelty, len), Deadline::none()).unwrap();

        prop_assert!((0.0..=1.0).contains(&result.aggregate_score));
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        let gated = result.hard_failures().count() > 0;
        let expected = if !gated && result.aggregate_score >= 0.7 {
            Decision::Accept
        } else {
            Decision::Reject
        };
        prop_assert_eq!(result.decision, expected);
        if evidence < 0.5 {
            prop_assert_eq!(result.decision, Decision::Reject);
        }
    }

    #[test]
    fn validation_is_deterministic(
        evidence in 0.0f64..=1.0,
        novelty in 0.0f64..=1.0,
        content in "\\PC{0,200}",
    ) {
        let engine = ValidationEngine::default();
        let mut f = finding("p", evidence, novelty, 0);
        f.content = content;
        let a = engine.validate(&f, Deadline::none()).unwrap();
        let b = engine.validate(&f, Deadline::none()).unwrap();
        prop_assert_eq!(a.outcomes, b.outcomes);
        prop_assert_eq!(a.decision, b.decision);
    }
}
