use proptest::prelude::*;

use lore_core::models::SynthesizedEntity;
use lore_core::similarity::{cosine_similarity, similarity};

fn vector(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, len)
}

proptest! {
    #[test]
    fn cosine_is_symmetric_and_bounded((a, b) in (1usize..32).prop_flat_map(|n| (vector(n), vector(n)))) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!((-1.0..=1.0).contains(&ab));
        prop_assert!((0.0..=1.0).contains(&similarity(&a, &b)));
    }

    #[test]
    fn cosine_ignores_positive_scaling(a in vector(16), scale in 0.1f32..50.0) {
        let scaled: Vec<f32> = a.iter().map(|x| x * scale).collect();
        let norm: f32 = a.iter().map(|x| x * x).sum();
        prop_assume!(norm > 1e-3);
        prop_assert!((cosine_similarity(&a, &scaled) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn synthesized_id_is_order_independent(mut ids in prop::collection::vec("[a-z0-9]{1,8}", 1..12)) {
        let forward = SynthesizedEntity::derive_id(&ids);
        ids.reverse();
        prop_assert_eq!(forward, SynthesizedEntity::derive_id(&ids));
    }
}
