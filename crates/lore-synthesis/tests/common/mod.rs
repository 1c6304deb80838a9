#![allow(dead_code)]

use chrono::{TimeZone, Utc};

use lore_core::models::*;

/// Unit vector at `angle` radians in the first two components.
pub fn vec_at(angle: f64) -> Vec<f32> {
    vec![angle.cos() as f32, angle.sin() as f32, 0.0, 0.0]
}

/// A pair of vectors whose cosine similarity is `sim`.
pub fn pair_with_similarity(sim: f64) -> (Vec<f32>, Vec<f32>) {
    (vec_at(0.0), vec_at(sim.clamp(-1.0, 1.0).acos()))
}

pub fn raw(id: &str, content_type: ContentType, embedding: Option<Vec<f32>>) -> RawFinding {
    RawFinding {
        id: id.into(),
        content: format!("Finding {id} about omega-3."),
        content_type,
        evidence_score: 0.9,
        novelty_score: 0.8,
        embeddings: EmbeddingPair {
            text: embedding,
            visual: None,
        },
        query: None,
        source: SourceMetadata {
            source_ref: format!("src:{id}"),
            source_url: None,
            kind: SourceKind::Academic,
            authors: Vec::new(),
            published_at: None,
        },
        topics: vec!["omega-3".into()],
        keywords: vec![format!("kw-{id}")],
    }
}

pub fn validated(finding: RawFinding, confidence: f64, decision: Decision) -> ValidatedFinding {
    let result = ValidationResult {
        finding_id: finding.id.clone(),
        outcomes: Vec::new(),
        aggregate_score: confidence,
        confidence,
        decision,
        validated_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    };
    ValidatedFinding::new(finding, result)
}

pub fn accepted(id: &str, embedding: Vec<f32>, confidence: f64) -> ValidatedFinding {
    validated(raw(id, ContentType::Research, Some(embedding)), confidence, Decision::Accept)
}

pub fn knowledge_item(id: &str, embedding: Vec<f32>) -> KnowledgeItem {
    KnowledgeItem {
        id: id.into(),
        source_ref: format!("src:{id}"),
        concept: "omega-3".into(),
        content: format!("Stored item {id}."),
        content_type: ContentType::Research,
        evidence_score: 0.8,
        novelty_score: 0.5,
        citations: Vec::new(),
        embedding,
        category: "nutrition".into(),
        video: None,
        extensions: ExtensionMap::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}
