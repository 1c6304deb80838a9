//! similar_to links for synthesized entities.

mod common;

use lore_core::config::{LoreConfig, SynthesisConfig};
use lore_core::models::*;
use lore_core::traits::{IGraphStore, IKnowledgeStore, ISynthesizer};
use lore_core::Deadline;
use lore_storage::StorageEngine;
use lore_synthesis::relations::external_relations;
use lore_synthesis::{persist, SynthesisEngine};

use common::*;

fn store() -> StorageEngine {
    let mut config = LoreConfig::default();
    config.embedding.text_dimensions = 4;
    StorageEngine::open_in_memory(&config).unwrap()
}

/// Two singleton entities whose centroids have cosine `sim`.
fn singletons(engine: &SynthesisEngine, sim: f64) -> Vec<SynthesizedEntity> {
    let (a, b) = pair_with_similarity(sim);
    let findings = vec![
        validated(raw("x", ContentType::Research, Some(a)), 0.9, Decision::Accept),
        validated(raw("y", ContentType::Article, Some(b)), 0.9, Decision::Accept),
    ];
    engine.synthesize(&findings, Deadline::none()).unwrap()
}

#[test]
fn similar_new_entities_link_both_ways() {
    let store = store();
    let engine = SynthesisEngine::default();
    // Different content types never cluster, so both stay singletons.
    let entities = persist(&singletons(&engine, 0.9), &store, Deadline::none()).unwrap();
    assert_eq!(entities.len(), 2);

    let edges = engine.link_relations(&entities, &store, Deadline::none()).unwrap();
    assert_eq!(edges.len(), 2);
    for edge in &edges {
        assert_eq!(edge.relation_type, RelationType::SimilarTo);
        assert!((edge.similarity - 0.9).abs() < 1e-6);
    }

    let out = store.edges_from(&entities[0].id).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].target_id, entities[1].id);
    let back = store.edges_from(&entities[1].id).unwrap();
    assert_eq!(back[0].target_id, entities[0].id);
}

#[test]
fn links_below_min_confidence_are_not_written() {
    let store = store();
    let engine = SynthesisEngine::default();
    let entities = persist(&singletons(&engine, 0.5), &store, Deadline::none()).unwrap();
    let edges = engine.link_relations(&entities, &store, Deadline::none()).unwrap();
    assert!(edges.is_empty());
    assert!(store.edges_from(&entities[0].id).unwrap().is_empty());
}

#[test]
fn new_entities_link_to_stored_neighbours() {
    let store = store();
    let (a, near) = pair_with_similarity(0.95);
    let (_, far) = pair_with_similarity(0.2);
    store.upsert(&Entity::Item(knowledge_item("item-near", near))).unwrap();
    store.upsert(&Entity::Item(knowledge_item("item-far", far))).unwrap();

    let engine = SynthesisEngine::default();
    let entities = engine
        .synthesize(&[accepted("omega-a", a, 0.9)], Deadline::none())
        .unwrap();
    let entities = persist(&entities, &store, Deadline::none()).unwrap();

    let edges = external_relations(&entities, &store, engine.config(), Deadline::none()).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].source_id, entities[0].id);
    assert_eq!(edges[0].target_id, "item-near");
    // Later of the two endpoints.
    assert_eq!(edges[0].created_at, entities[0].created_at);

    engine.link_relations(&entities, &store, Deadline::none()).unwrap();
    assert_eq!(store.node_concept(&entities[0].id).unwrap(), "omega-3");
    assert_eq!(store.edges_from(&entities[0].id).unwrap().len(), 1);
}

#[test]
fn relinking_rewrites_nothing() {
    let store = store();
    let engine = SynthesisEngine::default();
    let entities = persist(&singletons(&engine, 0.9), &store, Deadline::none()).unwrap();

    let first = engine.link_relations(&entities, &store, Deadline::none()).unwrap();
    let second = engine.link_relations(&entities, &store, Deadline::none()).unwrap();
    assert_eq!(first, second);
    for edge in &first {
        assert_eq!(store.version_of(&edge.id()).unwrap(), 1);
    }
}

#[test]
fn linking_can_be_switched_off() {
    let store = store();
    let engine = SynthesisEngine::new(SynthesisConfig {
        link_relations: false,
        ..SynthesisConfig::default()
    });
    let entities = persist(&singletons(&engine, 0.9), &store, Deadline::none()).unwrap();
    assert!(engine
        .link_relations(&entities, &store, Deadline::none())
        .unwrap()
        .is_empty());
}
