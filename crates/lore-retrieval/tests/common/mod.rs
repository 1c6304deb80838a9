#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use lore_core::config::LoreConfig;
use lore_core::models::*;
use lore_core::traits::IKnowledgeStore;
use lore_retrieval::RetrievalEngine;
use lore_storage::StorageEngine;

pub const TEXT_DIMS: usize = 4;
pub const VISUAL_DIMS: usize = 3;

pub fn config() -> LoreConfig {
    let mut config = LoreConfig::default();
    config.embedding.text_dimensions = TEXT_DIMS;
    config.embedding.visual_dimensions = VISUAL_DIMS;
    config
}

pub fn store() -> Arc<StorageEngine> {
    let store = Arc::new(StorageEngine::open_in_memory(&config()).unwrap());
    store.upsert(&Entity::Item(item("parent"))).unwrap();
    store
}

pub fn retrieval<S: IKnowledgeStore>(store: Arc<S>) -> RetrievalEngine<S> {
    let config = config();
    RetrievalEngine::new(store, config.retrieval, config.embedding)
}

pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

/// Text query every test searches with.
pub fn query() -> Vec<f32> {
    vec![1.0, 0.0, 0.0, 0.0]
}

pub fn visual_query() -> Vec<f32> {
    vec![1.0, 0.0, 0.0]
}

/// Text vector whose cosine similarity with `query()` is `sim`.
pub fn text_with_similarity(sim: f64) -> Vec<f32> {
    let angle = sim.clamp(-1.0, 1.0).acos();
    vec![angle.cos() as f32, angle.sin() as f32, 0.0, 0.0]
}

/// Visual vector whose cosine similarity with `visual_query()` is `sim`.
pub fn visual_with_similarity(sim: f64) -> Vec<f32> {
    let angle = sim.clamp(-1.0, 1.0).acos();
    vec![angle.cos() as f32, angle.sin() as f32, 0.0]
}

pub fn item(id: &str) -> KnowledgeItem {
    KnowledgeItem {
        id: id.into(),
        source_ref: format!("src:{id}"),
        concept: "nutrition".into(),
        content: "Parent item.".into(),
        content_type: ContentType::Article,
        evidence_score: 0.8,
        novelty_score: 0.5,
        citations: Vec::new(),
        embedding: query(),
        category: "general".into(),
        video: None,
        extensions: ExtensionMap::new(),
        created_at: at(0),
    }
}

pub fn fragment(id: &str, text_sim: f64) -> KnowledgeFragment {
    KnowledgeFragment {
        id: id.into(),
        item_id: "parent".into(),
        content: format!("fragment {id}"),
        content_type: ContentType::Article,
        start_time: None,
        end_time: None,
        keywords: Vec::new(),
        topics: Vec::new(),
        confidence: 0.9,
        embedding: text_with_similarity(text_sim),
        visual_embeddings: Vec::new(),
        scene_change: false,
        motion_intensity: 0.0,
        created_at: at(0),
    }
}

pub fn frame(id: &str, fragment_id: &str, visual_sim: f64) -> VideoFrame {
    VideoFrame {
        id: id.into(),
        fragment_id: fragment_id.into(),
        timestamp: 1.0,
        asset_path: format!("frames/{id}.jpg"),
        embedding: visual_with_similarity(visual_sim),
        detected_objects: Vec::new(),
        scene_score: 0.5,
        created_at: at(0),
    }
}

pub fn put(store: &StorageEngine, entity: impl Into<Entity>) {
    store.upsert(&entity.into()).unwrap();
}

pub fn ids(results: &[lore_retrieval::RankedFragment]) -> Vec<&str> {
    results.iter().map(|r| r.fragment.id.as_str()).collect()
}
