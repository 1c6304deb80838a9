//! RetrievalEngine: candidate gathering through the knowledge store, then
//! multimodal composite ranking.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use lore_core::config::{check_unit, EmbeddingConfig, RetrievalConfig};
use lore_core::errors::{EmbeddingError, LoreError, LoreResult};
use lore_core::models::{Modality, SearchTarget, VectorQuery};
use lore_core::traits::{IEmbeddingProvider, IKnowledgeStore};
use lore_core::Deadline;

use crate::ranking::{RankedFragment, RankingPipeline, ScoringInput};
use crate::request::SearchRequest;
use crate::visual::visual_similarity;

const OPERATION: &str = "retrieval.search";

pub struct RetrievalEngine<S> {
    store: Arc<S>,
    ranking: RankingPipeline,
    config: RetrievalConfig,
    embedding: EmbeddingConfig,
}

impl<S: IKnowledgeStore> RetrievalEngine<S> {
    pub fn new(store: Arc<S>, config: RetrievalConfig, embedding: EmbeddingConfig) -> Self {
        Self {
            store,
            ranking: RankingPipeline::new(config.weights, config.composite_bound),
            config,
            embedding,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// A request seeded with the configured default threshold and limit.
    pub fn request(&self, text_query: Vec<f32>) -> SearchRequest {
        SearchRequest::new(
            text_query,
            self.config.default_threshold,
            self.config.default_limit,
        )
    }

    /// Fragments whose text similarity exceeds `request.threshold`, ordered by
    /// composite score.
    pub fn search(
        &self,
        request: &SearchRequest,
        deadline: Deadline,
    ) -> LoreResult<Vec<RankedFragment>> {
        let _span = info_span!("lore.retrieval", limit = request.limit).entered();
        self.check_request(request)?;
        deadline.check(OPERATION)?;

        let query = VectorQuery::new(
            request.text_query.clone(),
            Modality::Text,
            SearchTarget::Fragments,
        )
        .threshold(request.threshold)
        .filters(request.filters.clone());
        let candidates = self.store.vector_search(&query)?;
        debug!(candidates = candidates.len(), "text candidates gathered");

        let mut inputs = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let text_similarity = candidate.similarity;
            let fragment = candidate.entity.into_fragment()?;
            let visual = match &request.visual_query {
                Some(visual_query) => {
                    deadline.check(OPERATION)?;
                    let frames = match self.store.frames_for_fragment(&fragment.id) {
                        Ok(frames) => frames,
                        Err(e) => {
                            warn!(
                                fragment_id = %fragment.id,
                                error = %e,
                                "frame lookup failed, visual score degraded to 0"
                            );
                            Vec::new()
                        }
                    };
                    visual_similarity(visual_query, &fragment, &frames, request.threshold)
                }
                None => 0.0,
            };
            inputs.push(ScoringInput {
                fragment,
                text_similarity,
                visual_similarity: visual,
            });
        }

        deadline.check(OPERATION)?;
        let ranked = self
            .ranking
            .rank(inputs, request.has_time_filter(), request.limit);
        info!(results = ranked.len(), "search complete");
        Ok(ranked)
    }

    /// Embed `text` through `embedder` and search with the result as the text
    /// query. Any text query already in `request` is replaced.
    pub fn search_text(
        &self,
        text: &str,
        embedder: &dyn IEmbeddingProvider,
        mut request: SearchRequest,
        deadline: Deadline,
    ) -> LoreResult<Vec<RankedFragment>> {
        if text.trim().is_empty() {
            return Err(LoreError::invalid("query text must not be empty"));
        }
        if !embedder.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: embedder.name().to_string(),
            }
            .into());
        }
        deadline.check(OPERATION)?;
        let vector = embedder.embed(text)?;
        self.embedding
            .check(Modality::Text, "embedded query", &vector)?;
        request.text_query = vector;
        self.search(&request, deadline)
    }

    fn check_request(&self, request: &SearchRequest) -> LoreResult<()> {
        check_unit("threshold", request.threshold)?;
        if request.limit == 0 {
            return Err(LoreError::invalid("limit must be greater than zero"));
        }
        self.embedding
            .check(Modality::Text, "text query", &request.text_query)?;
        if let Some(visual) = &request.visual_query {
            self.embedding.check(Modality::Visual, "visual query", visual)?;
        }
        Ok(())
    }
}
