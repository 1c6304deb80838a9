#[path = "../common/mod.rs"]
mod common;

use std::collections::BTreeSet;

use proptest::prelude::*;

use lore_core::models::Decision;
use lore_core::traits::ISynthesizer;
use lore_core::Deadline;
use lore_synthesis::SynthesisEngine;

use common::*;

fn findings(specs: &[(f64, bool)]) -> Vec<lore_core::models::ValidatedFinding> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (angle, accept))| {
            let decision = if *accept { Decision::Accept } else { Decision::Reject };
            validated(
                raw(&format!("f{i:03}"), lore_core::models::ContentType::Research, Some(vec_at(*angle))),
                0.8,
                decision,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn every_accepted_finding_lands_in_exactly_one_entity(
        specs in prop::collection::vec((0.0f64..3.0, any::<bool>()), 0..40),
        batch_size in 1usize..10,
    ) {
        let input = findings(&specs);
        let engine = SynthesisEngine::new(lore_core::config::SynthesisConfig {
            min_confidence: 0.7,
            batch_size,
            ..lore_core::config::SynthesisConfig::default()
        });
        let entities = engine.synthesize(&input, Deadline::none()).unwrap();

        let mut seen = BTreeSet::new();
        for entity in &entities {
            prop_assert!(!entity.provenance.is_empty());
            prop_assert!(entity.provenance.len() <= batch_size);
            for id in &entity.provenance {
                prop_assert!(seen.insert(id.clone()), "{} in two entities", id);
            }
        }
        let accepted: BTreeSet<String> = input
            .iter()
            .filter(|f| f.result.is_accepted())
            .map(|f| f.finding.id.clone())
            .collect();
        prop_assert_eq!(seen, accepted);
    }

    #[test]
    fn provenance_is_stable_under_reordering(
        specs in prop::collection::vec((0.0f64..3.0, Just(true)), 1..30),
        rotate in 0usize..30,
    ) {
        let input = findings(&specs);
        let mut shuffled = input.clone();
        let len = shuffled.len();
        shuffled.rotate_left(rotate % len);

        let engine = SynthesisEngine::default();
        let a: Vec<Vec<String>> = engine.synthesize(&input, Deadline::none()).unwrap()
            .into_iter().map(|e| e.provenance).collect();
        let b: Vec<Vec<String>> = engine.synthesize(&shuffled, Deadline::none()).unwrap()
            .into_iter().map(|e| e.provenance).collect();
        prop_assert_eq!(a, b);
    }
}
