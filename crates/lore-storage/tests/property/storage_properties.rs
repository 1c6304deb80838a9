#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;

use common::*;
use lore_core::models::*;
use lore_core::traits::IKnowledgeStore;

fn text_vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, TEXT_DIMS)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn vector_search_never_returns_at_or_below_threshold(
        embeddings in prop::collection::vec(text_vector(), 1..12),
        query in text_vector(),
        threshold in 0.0f64..1.0,
    ) {
        let engine = engine();
        engine.upsert(&make_item("item", "c").into()).unwrap();
        for (i, embedding) in embeddings.into_iter().enumerate() {
            engine.upsert(&make_fragment(&format!("f{i}"), "item", embedding).into()).unwrap();
        }

        let hits = engine
            .vector_search(&VectorQuery::new(query, Modality::Text, SearchTarget::Fragments).threshold(threshold))
            .unwrap();
        for pair in hits.windows(2) {
            prop_assert!(pair[0].similarity >= pair[1].similarity);
        }
        for hit in hits {
            prop_assert!(hit.similarity > threshold);
            prop_assert!(hit.similarity <= 1.0);
        }
    }

    #[test]
    fn upserted_fragment_round_trips(
        embedding in text_vector(),
        confidence in 0.0f64..=1.0,
        start in 0.0f64..1000.0,
        length in 0.0f64..100.0,
        keywords in prop::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let engine = engine();
        engine.upsert(&make_item("item", "c").into()).unwrap();
        let mut fragment = make_fragment("f", "item", embedding);
        fragment.confidence = confidence;
        fragment.start_time = Some(start);
        fragment.end_time = Some(start + length);
        fragment.keywords = keywords;
        let entity = Entity::from(fragment);
        engine.upsert(&entity).unwrap();
        prop_assert_eq!(engine.get("f").unwrap(), entity);
    }
}
