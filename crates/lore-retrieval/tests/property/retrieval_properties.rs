#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;

use lore_core::Deadline;
use lore_retrieval::ranking::compare;
use lore_retrieval::SearchRequest;

use common::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn results_exceed_threshold_and_are_ordered(
        sims in prop::collection::vec((0.0f64..=1.0, any::<bool>()), 1..15),
        threshold in 0.0f64..0.95,
        limit in 1usize..20,
    ) {
        let store = store();
        for (i, (sim, scene)) in sims.iter().enumerate() {
            let mut f = fragment(&format!("f{i}"), *sim);
            f.scene_change = *scene;
            put(&store, f);
        }
        let engine = retrieval(store);
        let request = SearchRequest::new(query(), threshold, limit);

        let results = engine.search(&request, Deadline::none()).unwrap();
        prop_assert!(results.len() <= limit);
        for r in &results {
            prop_assert!(r.text_similarity > threshold);
            prop_assert!((0.0..=1.0).contains(&r.composite_score));
            prop_assert_eq!(r.scene_bonus, 0.0);
        }
        for pair in results.windows(2) {
            prop_assert!(compare(&pair[0], &pair[1]) != std::cmp::Ordering::Greater);
        }

        let again = engine.search(&request, Deadline::none()).unwrap();
        prop_assert_eq!(ids(&results), ids(&again));
    }
}
