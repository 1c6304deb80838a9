#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use lore_core::config::LoreConfig;
use lore_core::models::*;
use lore_storage::StorageEngine;

pub const TEXT_DIMS: usize = 4;
pub const VISUAL_DIMS: usize = 3;

pub fn config() -> LoreConfig {
    let mut config = LoreConfig::default();
    config.embedding.text_dimensions = TEXT_DIMS;
    config.embedding.visual_dimensions = VISUAL_DIMS;
    config
}

pub fn engine() -> StorageEngine {
    StorageEngine::open_in_memory(&config()).unwrap()
}

pub fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset_secs)
}

/// Unit vector at `angle` radians in the first two components.
pub fn text_vec(angle: f64) -> Vec<f32> {
    vec![angle.cos() as f32, angle.sin() as f32, 0.0, 0.0]
}

/// Text vector whose cosine similarity with `text_vec(0.0)` is `sim`.
pub fn text_with_similarity(sim: f64) -> Vec<f32> {
    text_vec(sim.clamp(-1.0, 1.0).acos())
}

pub fn visual_with_similarity(sim: f64) -> Vec<f32> {
    let angle = sim.clamp(-1.0, 1.0).acos();
    vec![angle.cos() as f32, angle.sin() as f32, 0.0]
}

pub fn make_item(id: &str, concept: &str) -> KnowledgeItem {
    KnowledgeItem {
        id: id.into(),
        source_ref: format!("src:{id}"),
        concept: concept.into(),
        content: format!("Knowledge about {concept}."),
        content_type: ContentType::Article,
        evidence_score: 0.8,
        novelty_score: 0.5,
        citations: Vec::new(),
        embedding: text_vec(0.0),
        category: "general".into(),
        video: None,
        extensions: ExtensionMap::new(),
        created_at: at(0),
    }
}

pub fn make_video_item(id: &str) -> KnowledgeItem {
    KnowledgeItem {
        content_type: ContentType::Video,
        video: Some(VideoDetails {
            summary: "A lecture".into(),
            topics: vec!["nutrition".into()],
            metadata: VideoMetadata {
                duration_secs: 600.0,
                frame_rate: 30.0,
                resolution: Resolution {
                    width: 1280,
                    height: 720,
                },
                codec: "vp9".into(),
            },
        }),
        ..make_item(id, "lecture")
    }
}

pub fn make_fragment(id: &str, item_id: &str, embedding: Vec<f32>) -> KnowledgeFragment {
    KnowledgeFragment {
        id: id.into(),
        item_id: item_id.into(),
        content: format!("fragment {id}"),
        content_type: ContentType::Article,
        start_time: None,
        end_time: None,
        keywords: vec!["k".into()],
        topics: Vec::new(),
        confidence: 0.9,
        embedding,
        visual_embeddings: Vec::new(),
        scene_change: false,
        motion_intensity: 0.0,
        created_at: at(0),
    }
}

pub fn make_frame(id: &str, fragment_id: &str, timestamp: f64, embedding: Vec<f32>) -> VideoFrame {
    VideoFrame {
        id: id.into(),
        fragment_id: fragment_id.into(),
        timestamp,
        asset_path: format!("frames/{id}.jpg"),
        embedding,
        detected_objects: vec![DetectedObject {
            label: "person".into(),
            confidence: 0.7,
            bbox: Some(BoundingBox {
                x: 0.1,
                y: 0.1,
                width: 0.5,
                height: 0.8,
            }),
        }],
        scene_score: 0.6,
        created_at: at(0),
    }
}

pub fn make_edge(source: &str, target: &str, similarity: f64) -> Relationship {
    Relationship {
        source_id: source.into(),
        target_id: target.into(),
        relation_type: RelationType::SimilarTo,
        similarity,
        created_at: at(0),
    }
}

pub fn make_synthesized(id: &str, topics: &[&str], embedding: Vec<f32>) -> SynthesizedEntity {
    SynthesizedEntity {
        id: id.into(),
        content_type: ContentType::Research,
        content: format!("merged {id}"),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        keywords: Vec::new(),
        provenance: vec![format!("finding-{id}")],
        confidence: 0.85,
        embedding,
        created_at: at(0),
    }
}
