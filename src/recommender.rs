//! Server-side itinerary selection
//!
//! The ranking algorithm is pluggable. The default recommender only fills the
//! requested time with catalog attractions; it does no route optimization.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::Result;
use crate::models::{Attraction, RecommendationRequest, RecommendationResponse};

#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse>;
}

/// Walks the catalog in order and keeps every attraction whose visit still fits
/// in the remaining time
pub struct CatalogRecommender {
    catalog: Arc<Vec<Attraction>>,
}

impl CatalogRecommender {
    #[must_use]
    pub fn new(catalog: Arc<Vec<Attraction>>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Recommender for CatalogRecommender {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        request.validate()?;

        let mut remaining = request.duration_minutes();
        let mut itinerary = Vec::new();
        for attraction in self.catalog.iter() {
            if attraction.average_visit_duration <= remaining {
                remaining -= attraction.average_visit_duration;
                itinerary.push(attraction.clone());
            }
        }

        debug!(
            "Selected {} of {} attractions, {} minutes left",
            itinerary.len(),
            self.catalog.len(),
            remaining
        );
        Ok(itinerary)
    }
}
