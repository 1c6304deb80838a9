use serde::{Deserialize, Serialize};

use lore_core::models::SearchFilters;

/// A multimodal fragment search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub text_query: Vec<f32>,
    #[serde(default)]
    pub visual_query: Option<Vec<f32>>,
    /// Fragments must score strictly above this on text similarity.
    pub threshold: f64,
    pub limit: usize,
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchRequest {
    pub fn new(text_query: Vec<f32>, threshold: f64, limit: usize) -> Self {
        Self {
            text_query,
            visual_query: None,
            threshold,
            limit,
            filters: SearchFilters::none(),
        }
    }

    pub fn visual(mut self, visual_query: Vec<f32>) -> Self {
        self.visual_query = Some(visual_query);
        self
    }

    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Whether the scene-change bonus can apply.
    pub fn has_time_filter(&self) -> bool {
        self.filters.time_range.is_some()
    }
}
