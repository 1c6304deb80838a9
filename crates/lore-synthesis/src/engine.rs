//! SynthesisEngine: implements ISynthesizer.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, info_span};

use lore_core::config::{check_unit, SynthesisConfig};
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{ContentType, Entity, Relationship, SynthesizedEntity, ValidatedFinding};
use lore_core::traits::{IKnowledgeStore, ISynthesizer};
use lore_core::Deadline;

use crate::clustering;
use crate::merge::merge;
use crate::relations::{external_relations, internal_relations};

const OPERATION: &str = "synthesis.synthesize";

#[derive(Debug, Clone, Default)]
pub struct SynthesisEngine {
    config: SynthesisConfig,
}

impl SynthesisEngine {
    pub fn new(config: SynthesisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Link persisted entities to each other and to stored neighbours with
    /// `similar_to` edges, upserting and returning them. Does nothing when
    /// `link_relations` is off.
    pub fn link_relations<S: IKnowledgeStore + ?Sized>(
        &self,
        entities: &[SynthesizedEntity],
        store: &S,
        deadline: Deadline,
    ) -> LoreResult<Vec<Relationship>> {
        let _span = info_span!("lore.synthesis.relations", entities = entities.len()).entered();
        if !self.config.link_relations || entities.is_empty() {
            return Ok(Vec::new());
        }
        deadline.check("synthesis.relations")?;

        let mut edges = internal_relations(entities, self.config.min_confidence);
        let internal = edges.len();
        edges.extend(external_relations(entities, store, &self.config, deadline)?);
        for edge in &edges {
            deadline.check("synthesis.relations")?;
            store.upsert(&Entity::Relationship(edge.clone()))?;
        }
        info!(
            internal,
            external = edges.len() - internal,
            "synthesized entities linked"
        );
        Ok(edges)
    }

    /// Cluster and merge one batch of same-type findings.
    fn synthesize_batch(&self, batch: &[&ValidatedFinding]) -> LoreResult<Vec<SynthesizedEntity>> {
        let embeddings: Vec<Option<&[f32]>> = batch
            .iter()
            .map(|f| f.finding.embeddings.text.as_deref().filter(|e| !e.is_empty()))
            .collect();
        clustering::cluster(&embeddings, self.config.min_confidence)
            .into_iter()
            .map(|indices| {
                let members: Vec<&ValidatedFinding> = indices.iter().map(|&i| batch[i]).collect();
                merge(&members)
            })
            .collect()
    }
}

impl ISynthesizer for SynthesisEngine {
    fn synthesize(
        &self,
        findings: &[ValidatedFinding],
        deadline: Deadline,
    ) -> LoreResult<Vec<SynthesizedEntity>> {
        let _span = info_span!("lore.synthesis", findings = findings.len()).entered();
        check_unit("min_confidence", self.config.min_confidence)?;
        if self.config.batch_size == 0 {
            return Err(LoreError::invalid("batch_size must be greater than zero"));
        }
        deadline.check(OPERATION)?;

        let mut seen = HashSet::new();
        let mut groups: BTreeMap<ContentType, Vec<&ValidatedFinding>> = BTreeMap::new();
        let mut skipped = 0usize;
        for f in findings {
            if !seen.insert(f.finding.id.as_str()) {
                return Err(LoreError::invalid(format!(
                    "duplicate finding id {}",
                    f.finding.id
                )));
            }
            if f.result.finding_id != f.finding.id {
                return Err(LoreError::invalid(format!(
                    "validation result for {} attached to finding {}",
                    f.result.finding_id, f.finding.id
                )));
            }
            if !f.result.is_accepted() {
                skipped += 1;
                continue;
            }
            groups.entry(f.finding.content_type).or_default().push(f);
        }

        let mut entities = Vec::new();
        for (content_type, mut group) in groups {
            group.sort_by(|a, b| a.finding.id.cmp(&b.finding.id));
            for (batch_no, batch) in group.chunks(self.config.batch_size).enumerate() {
                deadline.check(OPERATION)?;
                let merged = self.synthesize_batch(batch)?;
                debug!(
                    %content_type,
                    batch = batch_no,
                    findings = batch.len(),
                    entities = merged.len(),
                    "batch synthesized"
                );
                entities.extend(merged);
            }
        }

        info!(
            entities = entities.len(),
            skipped_rejected = skipped,
            "synthesis complete"
        );
        Ok(entities)
    }
}

/// Upsert synthesized entities, returning them as stored.
///
/// Ids derive from provenance. An entity already stored under its id keeps
/// its original `created_at`, so persisting the same synthesis again writes
/// nothing new and a changed merge is versioned under the first timestamp.
pub fn persist<S: IKnowledgeStore + ?Sized>(
    entities: &[SynthesizedEntity],
    store: &S,
    deadline: Deadline,
) -> LoreResult<Vec<SynthesizedEntity>> {
    let mut stored = Vec::with_capacity(entities.len());
    for entity in entities {
        deadline.check("synthesis.persist")?;
        let mut entity = entity.clone();
        match store.get(&entity.id) {
            Ok(Entity::Synthesized(existing)) => entity.created_at = existing.created_at,
            // A different kind under this id is rejected by the upsert.
            Ok(_) | Err(LoreError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        store.upsert(&Entity::Synthesized(entity.clone()))?;
        stored.push(entity);
    }
    info!(persisted = stored.len(), "synthesized entities persisted");
    Ok(stored)
}
