//! Brute-force cosine search over stored embeddings.
//!
//! SQL applies the filter predicates; similarity is computed in Rust.
//! The query is assumed to have passed `boundary::validate_query`.

use std::cmp::Ordering;
use std::collections::HashMap;

use rusqlite::{Connection, ToSql};

use lore_core::errors::LoreResult;
use lore_core::models::{SearchCandidate, SearchTarget, VectorQuery};
use lore_core::similarity::similarity;

use super::entity_ops::modality_name;
use super::{bytes_to_f32_vec, parse_body};
use crate::to_storage_err;

const ITEM_SQL: &str = "
    SELECT e.id, e.body, v.embedding, v.dimensions
    FROM items i
    JOIN entities e ON e.id = i.id
    JOIN vectors v ON v.entity_id = i.id AND v.modality = ?1
    WHERE (?2 IS NULL OR i.content_type = ?2)
      AND (?3 IS NULL OR i.evidence_score >= ?3)";

const FRAGMENT_SQL: &str = "
    SELECT e.id, e.body, v.embedding, v.dimensions
    FROM fragments f
    JOIN entities e ON e.id = f.id
    JOIN vectors v ON v.entity_id = f.id AND v.modality = ?1
    WHERE (?2 IS NULL OR f.content_type = ?2)
      AND (?3 IS NULL OR f.confidence >= ?3)
      AND (?4 IS NULL OR (f.start_time IS NOT NULL AND f.end_time IS NOT NULL
                          AND f.start_time >= ?4 AND f.end_time <= ?5))";

const FRAME_SQL: &str = "
    SELECT e.id, e.body, v.embedding, v.dimensions
    FROM frames fr
    JOIN fragments f ON f.id = fr.fragment_id
    JOIN entities e ON e.id = fr.id
    JOIN vectors v ON v.entity_id = fr.id AND v.modality = ?1
    WHERE (?2 IS NULL OR f.content_type = ?2)
      AND (?3 IS NULL OR f.confidence >= ?3)
      AND (?4 IS NULL OR (fr.timestamp >= ?4 AND fr.timestamp <= ?5))";

const SYNTHESIZED_SQL: &str = "
    SELECT e.id, e.body, v.embedding, v.dimensions
    FROM synthesized s
    JOIN entities e ON e.id = s.id
    JOIN vectors v ON v.entity_id = s.id AND v.modality = ?1
    WHERE (?2 IS NULL OR s.content_type = ?2)
      AND (?3 IS NULL OR s.confidence >= ?3)";

/// Candidates with similarity strictly above the threshold, ordered by
/// similarity descending, then creation time ascending, then id.
///
/// An entity with several vectors in the queried modality (a fragment's
/// visual embeddings) scores as its best vector.
pub fn search(conn: &Connection, query: &VectorQuery) -> LoreResult<Vec<SearchCandidate>> {
    let sql = match query.target {
        SearchTarget::Items => ITEM_SQL,
        SearchTarget::Fragments => FRAGMENT_SQL,
        SearchTarget::Frames => FRAME_SQL,
        SearchTarget::Synthesized => SYNTHESIZED_SQL,
    };
    let filters = &query.filters;
    let content_type = filters.content_type.map(|ct| ct.as_str());
    let (range_start, range_end) = match filters.time_range {
        Some(r) => (Some(r.start), Some(r.end)),
        None => (None, None),
    };

    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let modality = modality_name(query.modality);
    let all: [&dyn ToSql; 5] = [
        &modality,
        &content_type,
        &filters.min_confidence,
        &range_start,
        &range_end,
    ];
    // ITEM_SQL and SYNTHESIZED_SQL bind three parameters.
    let bound: &[&dyn ToSql] = match query.target {
        SearchTarget::Items | SearchTarget::Synthesized => &all[..3],
        _ => &all[..],
    };
    let rows = stmt
        .query_map(bound, |row| {
            let id: String = row.get(0)?;
            let body: String = row.get(1)?;
            let blob: Vec<u8> = row.get(2)?;
            let dims: i64 = row.get(3)?;
            Ok((id, body, blob, dims))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let query_len = query.vector.len();
    let mut best: HashMap<String, (String, f64)> = HashMap::new();
    for row in rows {
        let (id, body, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_len {
            continue;
        }
        let sim = similarity(&query.vector, &bytes_to_f32_vec(&blob));
        if sim <= query.threshold {
            continue;
        }
        match best.get_mut(&id) {
            Some(entry) if entry.1 >= sim => {}
            Some(entry) => entry.1 = sim,
            None => {
                best.insert(id, (body, sim));
            }
        }
    }

    let mut candidates = best
        .into_iter()
        .map(|(id, (body, similarity))| {
            parse_body(&id, &body).map(|entity| SearchCandidate { entity, similarity })
        })
        .collect::<LoreResult<Vec<_>>>()?;
    sort_candidates(&mut candidates);
    candidates.truncate(query.limit);
    Ok(candidates)
}

/// Deterministic candidate order.
pub fn sort_candidates(candidates: &mut [SearchCandidate]) {
    candidates.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.entity.created_at().cmp(&b.entity.created_at()))
            .then_with(|| a.entity.id().cmp(&b.entity.id()))
    });
}

