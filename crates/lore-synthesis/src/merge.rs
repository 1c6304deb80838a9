//! Folding a cluster of findings into one entity.

use std::collections::HashSet;

use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{SynthesizedEntity, ValidatedFinding};
use lore_core::similarity::centroid;

/// Merge a non-empty cluster. Members are read in descending confidence
/// (ties by id), which fixes content order and first-seen order for
/// topics and keywords.
pub fn merge(members: &[&ValidatedFinding]) -> LoreResult<SynthesizedEntity> {
    let Some(first) = members.first() else {
        return Err(LoreError::invalid("cannot merge an empty cluster"));
    };
    let mut ordered: Vec<&ValidatedFinding> = members.to_vec();
    ordered.sort_by(|a, b| {
        b.result
            .confidence
            .total_cmp(&a.result.confidence)
            .then_with(|| a.finding.id.cmp(&b.finding.id))
    });

    let mut provenance: Vec<String> = members.iter().map(|m| m.finding.id.clone()).collect();
    provenance.sort();
    provenance.dedup();

    let confidence = members.iter().map(|m| m.result.confidence).sum::<f64>() / members.len() as f64;
    let created_at = members
        .iter()
        .map(|m| m.result.validated_at)
        .max()
        .unwrap_or(first.result.validated_at);

    Ok(SynthesizedEntity {
        id: SynthesizedEntity::derive_id(&provenance),
        content_type: first.finding.content_type,
        content: distinct(ordered.iter().map(|m| m.finding.content.trim())).join("\n\n"),
        topics: distinct(ordered.iter().flat_map(|m| m.finding.topics.iter().map(String::as_str))),
        keywords: distinct(ordered.iter().flat_map(|m| m.finding.keywords.iter().map(String::as_str))),
        provenance,
        confidence: confidence.clamp(0.0, 1.0),
        embedding: centroid(
            ordered
                .iter()
                .filter_map(|m| m.finding.embeddings.text.as_deref()),
        ),
        created_at,
    })
}

/// Non-empty values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}
