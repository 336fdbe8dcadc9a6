use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use tracing::{error, info};

use crate::models::{Attraction, RecommendationRequest, RecommendationResponse};
use crate::recommender::{CatalogRecommender, Recommender};

/// Shared state behind the `/api` routes
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Vec<Attraction>>,
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    /// State serving `catalog` with the default catalog recommender
    #[must_use]
    pub fn with_catalog(catalog: Vec<Attraction>) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            recommender: Arc::new(CatalogRecommender::new(Arc::clone(&catalog))),
            catalog,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/attractions", get(get_attractions))
        .route("/recommendations", post(post_recommendations))
        .with_state(state)
}

async fn get_attractions(State(state): State<AppState>) -> Json<Vec<Attraction>> {
    Json(state.catalog.as_ref().clone())
}

async fn post_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, (StatusCode, String)> {
    request
        .validate()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    info!(
        "Recommendation requested: {} interests, {}h, {} budget",
        request.interests.len(),
        request.duration,
        request.budget
    );

    let itinerary = state.recommender.recommend(&request).await.map_err(|e| {
        error!("Recommendation failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
    })?;
    Ok(Json(itinerary))
}
