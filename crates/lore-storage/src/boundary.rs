//! Shape checks applied to every entity and query before any I/O.
//!
//! Referential checks (parents exist, content types agree) need the
//! database and run inside the write transaction instead.

use lore_core::config::{check_unit, EmbeddingConfig, StorageConfig};
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{
    Citation, ContentType, Entity, KnowledgeFragment, KnowledgeItem, Locator, Modality,
    Relationship, SearchTarget, SynthesizedEntity, VectorQuery, VideoFrame,
};

/// Validate an entity's attributes against the deployment schema.
pub fn validate_entity(
    entity: &Entity,
    dims: &EmbeddingConfig,
    storage: &StorageConfig,
) -> LoreResult<()> {
    match entity {
        Entity::Item(item) => validate_item(item, dims, storage),
        Entity::Fragment(fragment) => validate_fragment(fragment, dims),
        Entity::Frame(frame) => validate_frame(frame, dims),
        Entity::Citation(citation) => validate_citation(citation),
        Entity::Relationship(rel) => validate_relationship(rel),
        Entity::Synthesized(entity) => validate_synthesized(entity, dims),
    }
}

fn require_id(kind: &str, id: &str) -> LoreResult<()> {
    if id.trim().is_empty() {
        return Err(LoreError::invalid(format!("{kind} id must not be empty")));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> LoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LoreError::invalid(format!(
            "{field} must be finite and non-negative, got {value}"
        )))
    }
}

fn validate_item(
    item: &KnowledgeItem,
    dims: &EmbeddingConfig,
    storage: &StorageConfig,
) -> LoreResult<()> {
    require_id("item", &item.id)?;
    if item.concept.trim().is_empty() {
        return Err(LoreError::invalid(format!(
            "item {} has an empty concept label",
            item.id
        )));
    }
    check_unit("evidence_score", item.evidence_score)?;
    check_unit("novelty_score", item.novelty_score)?;
    dims.check(
        Modality::Text,
        &format!("item {} text embedding", item.id),
        &item.embedding,
    )?;

    match (&item.video, item.content_type) {
        (Some(video), ContentType::Video) => {
            let meta = &video.metadata;
            if !(meta.duration_secs.is_finite() && meta.duration_secs > 0.0)
                || !(meta.frame_rate.is_finite() && meta.frame_rate > 0.0)
            {
                return Err(LoreError::invalid(format!(
                    "item {}: video duration and frame rate must be positive",
                    item.id
                )));
            }
            if meta.resolution.width == 0 || meta.resolution.height == 0 {
                return Err(LoreError::invalid(format!(
                    "item {}: video resolution must be non-zero",
                    item.id
                )));
            }
            if meta.codec.trim().is_empty() {
                return Err(LoreError::invalid(format!(
                    "item {}: video codec must not be empty",
                    item.id
                )));
            }
        }
        (None, ContentType::Video) => {
            return Err(LoreError::invalid(format!(
                "item {}: video items require video metadata",
                item.id
            )));
        }
        (Some(_), other) => {
            return Err(LoreError::invalid(format!(
                "item {}: video metadata is only allowed on video items, not {other}",
                item.id
            )));
        }
        (None, _) => {}
    }

    let missing = item
        .extensions
        .missing(storage.required_extensions_for(item.content_type));
    if !missing.is_empty() {
        return Err(LoreError::invalid(format!(
            "item {}: missing required extension keys for {}: {}",
            item.id,
            item.content_type,
            missing.join(", ")
        )));
    }
    Ok(())
}

fn validate_fragment(fragment: &KnowledgeFragment, dims: &EmbeddingConfig) -> LoreResult<()> {
    require_id("fragment", &fragment.id)?;
    require_id("parent item", &fragment.item_id)?;
    check_unit("confidence", fragment.confidence)?;
    non_negative("motion_intensity", fragment.motion_intensity)?;
    dims.check(
        Modality::Text,
        &format!("fragment {} text embedding", fragment.id),
        &fragment.embedding,
    )?;
    for (i, visual) in fragment.visual_embeddings.iter().enumerate() {
        dims.check(
            Modality::Visual,
            &format!("fragment {} visual embedding {i}", fragment.id),
            visual,
        )?;
    }

    match (fragment.start_time, fragment.end_time) {
        (Some(start), Some(end)) => {
            non_negative("start_time", start)?;
            non_negative("end_time", end)?;
            if start > end {
                return Err(LoreError::invalid(format!(
                    "fragment {}: start {start} is after end {end}",
                    fragment.id
                )));
            }
        }
        (None, None) => {}
        _ => {
            return Err(LoreError::invalid(format!(
                "fragment {}: start and end time must be given together",
                fragment.id
            )));
        }
    }
    Ok(())
}

fn validate_frame(frame: &VideoFrame, dims: &EmbeddingConfig) -> LoreResult<()> {
    require_id("frame", &frame.id)?;
    require_id("parent fragment", &frame.fragment_id)?;
    non_negative("timestamp", frame.timestamp)?;
    check_unit("scene_score", frame.scene_score)?;
    dims.check(
        Modality::Visual,
        &format!("frame {} visual embedding", frame.id),
        &frame.embedding,
    )?;
    for object in &frame.detected_objects {
        check_unit("detected object confidence", object.confidence)?;
        if let Some(bbox) = object.bbox {
            for (field, v) in [
                ("bbox.x", bbox.x),
                ("bbox.y", bbox.y),
                ("bbox.width", bbox.width),
                ("bbox.height", bbox.height),
            ] {
                check_unit(field, v)?;
            }
        }
    }
    Ok(())
}

fn validate_citation(citation: &Citation) -> LoreResult<()> {
    require_id("citation", &citation.id)?;
    if let Some(Locator::Timestamp(t)) = citation.locator {
        non_negative("citation timestamp", t)?;
    }
    Ok(())
}

fn validate_relationship(rel: &Relationship) -> LoreResult<()> {
    require_id("relationship source", &rel.source_id)?;
    require_id("relationship target", &rel.target_id)?;
    if rel.source_id == rel.target_id {
        return Err(LoreError::invalid(format!(
            "self-loop on {} rejected",
            rel.source_id
        )));
    }
    check_unit("similarity", rel.similarity)
}

fn validate_synthesized(entity: &SynthesizedEntity, dims: &EmbeddingConfig) -> LoreResult<()> {
    require_id("synthesized entity", &entity.id)?;
    if entity.provenance.is_empty() {
        return Err(LoreError::invalid(format!(
            "synthesized entity {} has no provenance",
            entity.id
        )));
    }
    check_unit("confidence", entity.confidence)?;
    if !entity.embedding.is_empty() {
        dims.check(
            Modality::Text,
            &format!("synthesized entity {} embedding", entity.id),
            &entity.embedding,
        )?;
    }
    Ok(())
}

/// Validate a vector query: pairing, dimension, threshold, limit, filters.
pub fn validate_query(query: &VectorQuery, dims: &EmbeddingConfig) -> LoreResult<()> {
    match (query.modality, query.target) {
        (
            Modality::Text,
            SearchTarget::Items | SearchTarget::Fragments | SearchTarget::Synthesized,
        )
        | (Modality::Visual, SearchTarget::Fragments | SearchTarget::Frames) => {}
        (modality, target) => {
            return Err(LoreError::invalid(format!(
                "cannot search {target:?} by {modality:?} similarity"
            )));
        }
    }
    dims.check(query.modality, "query vector", &query.vector)?;
    check_unit("threshold", query.threshold)?;
    if query.limit == 0 {
        return Err(LoreError::invalid("limit must be positive"));
    }
    if let Some(min) = query.filters.min_confidence {
        check_unit("min_confidence filter", min)?;
    }
    if let Some(range) = query.filters.time_range {
        if matches!(query.target, SearchTarget::Items | SearchTarget::Synthesized) {
            return Err(LoreError::invalid(format!(
                "{:?} carry no time bounds to filter on",
                query.target
            )));
        }
        if !(range.start.is_finite() && range.end.is_finite()) || range.start > range.end {
            return Err(LoreError::invalid(format!(
                "time range [{}, {}] is not a valid closed range",
                range.start, range.end
            )));
        }
    }
    Ok(())
}
