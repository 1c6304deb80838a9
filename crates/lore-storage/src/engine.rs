//! StorageEngine: owns the connection pool and write leases, implements
//! `IKnowledgeStore` + `IGraphStore`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use lore_core::config::{EmbeddingConfig, LoreConfig, StorageConfig};
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{Entity, Relationship, SearchCandidate, VectorQuery, VideoFrame};
use lore_core::traits::{IGraphStore, IKnowledgeStore};

use crate::boundary;
use crate::leases::{WriteLease, WriteLeases};
use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::entity_ops::{self, UpsertOutcome};
use crate::queries::version_ops::{self, EntityVersion};
use crate::queries::{relationship_ops, vector_search};

/// The hybrid store.
pub struct StorageEngine {
    pool: ConnectionPool,
    leases: Arc<WriteLeases>,
    embedding: EmbeddingConfig,
    storage: StorageConfig,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, config: &LoreConfig) -> LoreResult<Self> {
        let pool = ConnectionPool::open(path, &config.storage)?;
        Self::initialize(pool, config)
    }

    /// Open the file named by `config.storage.db_path`.
    pub fn open_configured(config: &LoreConfig) -> LoreResult<Self> {
        Self::open(Path::new(&config.storage.db_path), config)
    }

    /// Open an in-memory storage engine. Reads are routed through the writer.
    pub fn open_in_memory(config: &LoreConfig) -> LoreResult<Self> {
        let pool = ConnectionPool::open_in_memory(&config.storage)?;
        Self::initialize(pool, config)
    }

    fn initialize(pool: ConnectionPool, config: &LoreConfig) -> LoreResult<Self> {
        let version = pool.writer.with_conn(migrations::run_migrations)?;
        info!(
            schema_version = version,
            path = ?pool.db_path,
            "storage engine ready"
        );
        Ok(Self {
            pool,
            leases: WriteLeases::new(),
            embedding: config.embedding,
            storage: config.storage.clone(),
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn embedding_config(&self) -> &EmbeddingConfig {
        &self.embedding
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> LoreResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LoreResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }

    /// Take the write lease for `id`. While held, other upserts of `id`
    /// fail with `WriteConflict`.
    pub fn lease(&self, id: &str) -> LoreResult<WriteLease> {
        self.leases.acquire(id)
    }

    pub fn is_leased(&self, id: &str) -> bool {
        self.leases.is_held(id)
    }

    /// Upsert through a lease the caller already holds for this entity's id.
    pub fn upsert_leased(&self, entity: &Entity, lease: &WriteLease) -> LoreResult<String> {
        let id = entity.id();
        if lease.id() != id || !lease.belongs_to(&self.leases) {
            return Err(LoreError::invalid(format!(
                "lease for {} does not cover {id}",
                lease.id()
            )));
        }
        boundary::validate_entity(entity, &self.embedding, &self.storage)?;
        self.write(entity, id)
    }

    fn write(&self, entity: &Entity, id: String) -> LoreResult<String> {
        let outcome = self
            .pool
            .writer
            .with_conn(|conn| entity_ops::upsert_entity(conn, entity))?;
        match outcome {
            UpsertOutcome::Unchanged => debug!(id = %id, kind = %entity.kind(), "upsert unchanged"),
            UpsertOutcome::Inserted => debug!(id = %id, kind = %entity.kind(), "entity inserted"),
            UpsertOutcome::Versioned(version) => {
                debug!(id = %id, kind = %entity.kind(), version, "entity versioned")
            }
        }
        Ok(id)
    }

    /// Current version number of an entity.
    pub fn version_of(&self, id: &str) -> LoreResult<u32> {
        self.with_reader(|conn| entity_ops::version_of(conn, id))?
            .ok_or_else(|| LoreError::not_found(id))
    }

    /// Superseded versions of an entity, oldest first.
    pub fn history(&self, id: &str) -> LoreResult<Vec<EntityVersion>> {
        self.with_reader(|conn| version_ops::history(conn, id))
    }

    /// Entity counts per kind.
    pub fn stats(&self) -> LoreResult<Vec<(String, i64)>> {
        self.with_reader(entity_ops::count_by_kind)
    }
}

impl IKnowledgeStore for StorageEngine {
    fn upsert(&self, entity: &Entity) -> LoreResult<String> {
        boundary::validate_entity(entity, &self.embedding, &self.storage)?;
        let id = entity.id();
        let _lease = self.leases.acquire(&id)?;
        self.write(entity, id)
    }

    fn get(&self, id: &str) -> LoreResult<Entity> {
        self.with_reader(|conn| entity_ops::get_entity(conn, id))?
            .ok_or_else(|| LoreError::not_found(id))
    }

    fn vector_search(&self, query: &VectorQuery) -> LoreResult<Vec<SearchCandidate>> {
        boundary::validate_query(query, &self.embedding)?;
        let candidates = self.with_reader(|conn| vector_search::search(conn, query))?;
        debug!(
            modality = ?query.modality,
            target = ?query.target,
            threshold = query.threshold,
            hits = candidates.len(),
            "vector search"
        );
        Ok(candidates)
    }

    fn frames_for_fragment(&self, fragment_id: &str) -> LoreResult<Vec<VideoFrame>> {
        self.with_reader(|conn| {
            if !relationship_ops::fragment_exists(conn, fragment_id)? {
                return Err(LoreError::not_found(fragment_id));
            }
            relationship_ops::frames_for_fragment(conn, fragment_id)
        })
    }
}

impl IGraphStore for StorageEngine {
    fn edges_from(&self, node_id: &str) -> LoreResult<Vec<Relationship>> {
        self.with_reader(|conn| relationship_ops::edges_from(conn, node_id))
    }

    fn items_with_concept(&self, concept: &str) -> LoreResult<Vec<String>> {
        self.with_reader(|conn| relationship_ops::items_with_concept(conn, concept))
    }

    fn node_concept(&self, node_id: &str) -> LoreResult<String> {
        self.with_reader(|conn| relationship_ops::node_concept(conn, node_id))?
            .ok_or_else(|| LoreError::not_found(node_id))
    }
}
