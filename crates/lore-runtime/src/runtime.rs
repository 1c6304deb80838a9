//! LoreRuntime: owns the store and every engine, runs blocking engine calls
//! on tokio's blocking pool under deadlines and concurrency limits.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use lore_core::config::LoreConfig;
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{
    Entity, RawFinding, Relationship, SynthesizedEntity, ValidatedFinding, ValidationResult,
};
use lore_core::traits::{IEmbeddingProvider, IKnowledgeStore, ISynthesizer, IValidator};
use lore_core::Deadline;
use lore_graph::{
    DiscoveryOptions, HybridQuery, HybridResult, PathSearchResult, TraversalEngine,
    TraversalResult,
};
use lore_retrieval::{RankedFragment, RetrievalEngine, SearchRequest};
use lore_storage::StorageEngine;
use lore_synthesis::{persist, SynthesisEngine};
use lore_validation::ValidationEngine;

use crate::tracing_setup::events;

/// Options for constructing the runtime.
#[derive(Debug, Default)]
pub struct RuntimeOptions {
    /// Path to the SQLite database. If None, uses in-memory.
    pub db_path: Option<PathBuf>,
    /// TOML configuration string. If None, uses defaults.
    pub config_toml: Option<String>,
}

/// Outcome of one validate → synthesize → persist run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub request_id: Uuid,
    pub validated: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Synthesized entities as persisted, in synthesis order.
    pub entities: Vec<SynthesizedEntity>,
    /// `similar_to` edges written for the persisted entities.
    pub relations: Vec<Relationship>,
}

impl PipelineReport {
    pub fn entity_ids(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.id.as_str()).collect()
    }
}

/// The central runtime owning all lore engines.
///
/// Every engine shares one `StorageEngine`; cloning the runtime's `Arc`s is
/// cheap, so calls may be issued concurrently from many tasks.
pub struct LoreRuntime {
    storage: Arc<StorageEngine>,
    retrieval: Arc<RetrievalEngine<StorageEngine>>,
    traversal: Arc<TraversalEngine<StorageEngine>>,
    validation: Arc<ValidationEngine>,
    synthesis: Arc<SynthesisEngine>,
    validation_permits: Arc<Semaphore>,
    synthesis_permits: Arc<Semaphore>,
    config: LoreConfig,
}

impl LoreRuntime {
    /// Create a new runtime with the given options.
    pub fn new(opts: RuntimeOptions) -> LoreResult<Self> {
        let config = match &opts.config_toml {
            Some(toml_str) => LoreConfig::from_toml(toml_str)?,
            None => LoreConfig::default(),
        };

        let storage = match &opts.db_path {
            Some(path) => StorageEngine::open(path, &config)?,
            None => StorageEngine::open_in_memory(&config)?,
        };
        Self::with_storage(Arc::new(storage), config)
    }

    /// Build the engines over an already-open store.
    pub fn with_storage(storage: Arc<StorageEngine>, config: LoreConfig) -> LoreResult<Self> {
        config.validate()?;
        let retrieval = RetrievalEngine::new(
            Arc::clone(&storage),
            config.retrieval.clone(),
            config.embedding,
        );
        let traversal = TraversalEngine::new(Arc::clone(&storage), config.traversal.clone());
        let validation = ValidationEngine::new(config.validation.clone());
        let synthesis = SynthesisEngine::new(config.synthesis.clone());

        tracing::info!(
            max_concurrent_validations = config.runtime.max_concurrent_validations,
            max_concurrent_synthesis = config.runtime.max_concurrent_synthesis,
            operation_timeout_ms = config.runtime.operation_timeout_ms,
            "lore runtime ready"
        );

        Ok(Self {
            storage,
            retrieval: Arc::new(retrieval),
            traversal: Arc::new(traversal),
            validation: Arc::new(validation),
            synthesis: Arc::new(synthesis),
            validation_permits: Arc::new(Semaphore::new(
                config.runtime.max_concurrent_validations,
            )),
            synthesis_permits: Arc::new(Semaphore::new(config.runtime.max_concurrent_synthesis)),
            config,
        })
    }

    pub fn config(&self) -> &LoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<StorageEngine> {
        &self.storage
    }

    /// Deadline applied to calls that pass [`Deadline::none`].
    pub fn default_deadline(&self) -> Deadline {
        Deadline::after(Duration::from_millis(self.config.runtime.operation_timeout_ms))
    }

    fn effective(&self, deadline: Deadline) -> Deadline {
        if deadline.expires_at().is_some() {
            deadline
        } else {
            self.default_deadline()
        }
    }

    // ── Store ─────────────────────────────────────────────────────────────

    pub async fn upsert(&self, entity: Entity, deadline: Deadline) -> LoreResult<String> {
        let storage = Arc::clone(&self.storage);
        run_blocking("store.upsert", self.effective(deadline), move || {
            storage.upsert(&entity)
        })
        .await
    }

    pub async fn get(&self, id: &str, deadline: Deadline) -> LoreResult<Entity> {
        let storage = Arc::clone(&self.storage);
        let id = id.to_string();
        run_blocking("store.get", self.effective(deadline), move || storage.get(&id)).await
    }

    // ── Query interface ───────────────────────────────────────────────────

    pub async fn search(
        &self,
        request: SearchRequest,
        deadline: Deadline,
    ) -> LoreResult<Vec<RankedFragment>> {
        let retrieval = Arc::clone(&self.retrieval);
        let deadline = self.effective(deadline);
        run_blocking("retrieval.search", deadline, move || {
            retrieval.search(&request, deadline)
        })
        .await
    }

    /// Embed `text` and search with it, using configured threshold and limit.
    pub async fn search_text(
        &self,
        text: &str,
        embedder: Arc<dyn IEmbeddingProvider>,
        deadline: Deadline,
    ) -> LoreResult<Vec<RankedFragment>> {
        let retrieval = Arc::clone(&self.retrieval);
        let text = text.to_string();
        let deadline = self.effective(deadline);
        run_blocking("retrieval.search_text", deadline, move || {
            let request = retrieval.request(Vec::new());
            retrieval.search_text(&text, embedder.as_ref(), request, deadline)
        })
        .await
    }

    pub async fn related_concepts(
        &self,
        start_concept: &str,
        min_similarity: f64,
        max_depth: usize,
        deadline: Deadline,
    ) -> LoreResult<TraversalResult> {
        let traversal = Arc::clone(&self.traversal);
        let start = start_concept.to_string();
        let deadline = self.effective(deadline);
        run_blocking("traversal.related_concepts", deadline, move || {
            traversal.related_concepts(&start, min_similarity, max_depth, deadline)
        })
        .await
    }

    pub async fn discover_relationships(
        &self,
        item_id: &str,
        options: DiscoveryOptions,
        deadline: Deadline,
    ) -> LoreResult<Vec<Relationship>> {
        let traversal = Arc::clone(&self.traversal);
        let item_id = item_id.to_string();
        let deadline = self.effective(deadline);
        run_blocking("traversal.discover", deadline, move || {
            traversal.discover_relationships(&item_id, options, deadline)
        })
        .await
    }

    pub async fn paths_between(
        &self,
        start_id: &str,
        end_id: &str,
        max_depth: usize,
        deadline: Deadline,
    ) -> LoreResult<PathSearchResult> {
        let traversal = Arc::clone(&self.traversal);
        let (start, end) = (start_id.to_string(), end_id.to_string());
        let deadline = self.effective(deadline);
        run_blocking("traversal.paths_between", deadline, move || {
            traversal.paths_between(&start, &end, max_depth, deadline)
        })
        .await
    }

    pub async fn hybrid_search(
        &self,
        query: HybridQuery,
        deadline: Deadline,
    ) -> LoreResult<HybridResult> {
        let traversal = Arc::clone(&self.traversal);
        let deadline = self.effective(deadline);
        run_blocking("traversal.hybrid_search", deadline, move || {
            traversal.hybrid_search(&query, deadline)
        })
        .await
    }

    // ── Validation / synthesis pipeline ───────────────────────────────────

    pub async fn validate(
        &self,
        finding: RawFinding,
        deadline: Deadline,
    ) -> LoreResult<ValidationResult> {
        let deadline = self.effective(deadline);
        let permits = Arc::clone(&self.validation_permits);
        let _permit = acquire(permits, "validation", deadline).await?;
        let validation = Arc::clone(&self.validation);
        run_blocking("validation.validate", deadline, move || {
            validation.validate(&finding, deadline)
        })
        .await
    }

    /// Validate many findings, each under its own permit, so a batch shares
    /// the concurrency limit with every other caller. Results keep input
    /// order; the first error fails the batch.
    pub async fn validate_batch(
        &self,
        findings: Vec<RawFinding>,
        deadline: Deadline,
    ) -> LoreResult<Vec<ValidatedFinding>> {
        let deadline = self.effective(deadline);
        let tasks: Vec<_> = findings
            .into_iter()
            .map(|finding| {
                let permits = Arc::clone(&self.validation_permits);
                let validation = Arc::clone(&self.validation);
                let task = async move {
                    let _permit = acquire(permits, "validation", deadline).await?;
                    let raw = finding.clone();
                    let result = run_blocking("validation.validate", deadline, move || {
                        validation.validate(&raw, deadline)
                    })
                    .await?;
                    Ok::<_, LoreError>(ValidatedFinding::new(finding, result))
                };
                tokio::spawn(task.in_current_span())
            })
            .collect();

        let mut validated = Vec::with_capacity(tasks.len());
        for task in tasks {
            let joined = task
                .await
                .map_err(|e| LoreError::ConcurrencyError(format!("validation.batch: {e}")))?;
            validated.push(joined?);
        }
        Ok(validated)
    }

    pub async fn synthesize(
        &self,
        findings: Vec<ValidatedFinding>,
        deadline: Deadline,
    ) -> LoreResult<Vec<SynthesizedEntity>> {
        let deadline = self.effective(deadline);
        let permits = Arc::clone(&self.synthesis_permits);
        let _permit = acquire(permits, "synthesis", deadline).await?;
        let synthesis = Arc::clone(&self.synthesis);
        run_blocking("synthesis.synthesize", deadline, move || {
            synthesis.synthesize(&findings, deadline)
        })
        .await
    }

    /// Validate raw findings, synthesize the accepted ones, persist the
    /// results and link them into the graph. Entities persisted before a
    /// timeout stay persisted; rerunning the same findings writes nothing
    /// new.
    pub async fn process_findings(
        &self,
        findings: Vec<RawFinding>,
        deadline: Deadline,
    ) -> LoreResult<PipelineReport> {
        let request_id = Uuid::new_v4();
        let deadline = self.effective(deadline);
        let span = info_span!("lore.pipeline", %request_id, findings = findings.len());

        async move {
            let validated = self.validate_batch(findings, deadline).await?;
            let accepted = validated.iter().filter(|v| v.result.is_accepted()).count();
            events::findings_validated(&request_id.to_string(), validated.len(), accepted);

            let total = validated.len();
            let entities = self.synthesize(validated, deadline).await?;

            let synthesized = entities.len();
            let storage = Arc::clone(&self.storage);
            let synthesis = Arc::clone(&self.synthesis);
            let (entities, relations) = run_blocking("synthesis.persist", deadline, move || {
                let stored = persist(&entities, storage.as_ref(), deadline)?;
                let relations = synthesis.link_relations(&stored, storage.as_ref(), deadline)?;
                Ok((stored, relations))
            })
            .await?;
            events::entities_synthesized(&request_id.to_string(), synthesized, entities.len());

            Ok(PipelineReport {
                request_id,
                validated: total,
                accepted,
                rejected: total - accepted,
                entities,
                relations,
            })
        }
        .instrument(span)
        .await
    }
}

/// Run a blocking engine call on the blocking pool, giving up with
/// `Timeout` once `deadline` passes. The engine checks the same deadline
/// itself, so abandoned work stops at its next checkpoint.
async fn run_blocking<T, F>(operation: &'static str, deadline: Deadline, f: F) -> LoreResult<T>
where
    F: FnOnce() -> LoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    deadline.check(operation)?;
    let started = Instant::now();
    let handle = tokio::task::spawn_blocking(f);
    let joined = with_deadline(operation, deadline, started, handle).await?;
    joined.map_err(|e| LoreError::ConcurrencyError(format!("{operation}: {e}")))?
}

async fn acquire(
    permits: Arc<Semaphore>,
    operation: &'static str,
    deadline: Deadline,
) -> LoreResult<OwnedSemaphorePermit> {
    let permit =
        with_deadline(operation, deadline, Instant::now(), permits.acquire_owned()).await?;
    permit.map_err(|e| LoreError::ConcurrencyError(format!("{operation}: {e}")))
}

async fn with_deadline<F: Future>(
    operation: &'static str,
    deadline: Deadline,
    started: Instant,
    fut: F,
) -> LoreResult<F::Output> {
    match deadline.remaining() {
        Some(left) => tokio::time::timeout(left, fut).await.map_err(|_| {
            events::operation_timed_out(operation, started.elapsed().as_millis());
            LoreError::timeout(operation)
        }),
        None => Ok(fut.await),
    }
}
