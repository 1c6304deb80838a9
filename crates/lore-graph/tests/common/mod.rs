#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use lore_core::config::LoreConfig;
use lore_core::models::*;
use lore_core::traits::IKnowledgeStore;
use lore_graph::TraversalEngine;
use lore_storage::StorageEngine;

pub const TEXT_DIMS: usize = 4;

pub fn config() -> LoreConfig {
    let mut config = LoreConfig::default();
    config.embedding.text_dimensions = TEXT_DIMS;
    config.embedding.visual_dimensions = 3;
    config
}

pub fn store() -> Arc<StorageEngine> {
    Arc::new(StorageEngine::open_in_memory(&config()).unwrap())
}

pub fn traversal(store: &Arc<StorageEngine>) -> TraversalEngine<StorageEngine> {
    TraversalEngine::new(Arc::clone(store), config().traversal)
}

pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

/// Unit vector at `angle` radians in the first two components.
pub fn text_vec(angle: f64) -> Vec<f32> {
    vec![angle.cos() as f32, angle.sin() as f32, 0.0, 0.0]
}

pub fn item(id: &str, concept: &str, embedding: Vec<f32>) -> KnowledgeItem {
    KnowledgeItem {
        id: id.into(),
        source_ref: format!("src:{id}"),
        concept: concept.into(),
        content: format!("Knowledge about {concept}."),
        content_type: ContentType::Article,
        evidence_score: 0.8,
        novelty_score: 0.5,
        citations: Vec::new(),
        embedding,
        category: "general".into(),
        video: None,
        extensions: ExtensionMap::new(),
        created_at: at(0),
    }
}

pub fn edge(source: &str, target: &str, similarity: f64) -> Relationship {
    Relationship {
        source_id: source.into(),
        target_id: target.into(),
        relation_type: RelationType::SimilarTo,
        similarity,
        created_at: at(0),
    }
}

pub fn put_item(store: &StorageEngine, id: &str, concept: &str) {
    store
        .upsert(&Entity::Item(item(id, concept, text_vec(0.0))))
        .unwrap();
}

pub fn put_edge(store: &StorageEngine, source: &str, target: &str, similarity: f64) {
    store
        .upsert(&Entity::Relationship(edge(source, target, similarity)))
        .unwrap();
}

pub fn synthesized(id: &str, topic: &str, embedding: Vec<f32>, confidence: f64) -> SynthesizedEntity {
    SynthesizedEntity {
        id: id.into(),
        content_type: ContentType::Research,
        content: format!("Synthesis about {topic}."),
        topics: vec![topic.into()],
        keywords: Vec::new(),
        provenance: vec![format!("finding-{id}")],
        confidence,
        embedding,
        created_at: at(60),
    }
}

pub fn put_synthesized(store: &StorageEngine, id: &str, topic: &str) {
    store
        .upsert(&Entity::Synthesized(synthesized(id, topic, text_vec(0.0), 0.8)))
        .unwrap();
}
