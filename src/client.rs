//! HTTP client for the recommendation backend
//!
//! Talks to `GET /api/attractions` and `POST /api/recommendations`. Failures are
//! reported as `RequestFailed` and never retried here; retry policy belongs to the
//! caller.

use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::BackendConfig;
use crate::models::{Attraction, RecommendationRequest, RecommendationResponse};
use crate::{Result, TourismError};

/// Something that can answer recommendation requests
pub trait RecommendationBackend {
    async fn submit(&self, request: &RecommendationRequest) -> Result<RecommendationResponse>;
}

/// Backend client over HTTP
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    client: Client,
    base_url: String,
}

impl RecommendationClient {
    /// Create a new client for the configured backend
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tourist-map/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TourismError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full attraction catalog
    #[instrument(skip(self))]
    pub async fn attractions(&self) -> Result<Vec<Attraction>> {
        let url = format!("{}/api/attractions", self.base_url);
        debug!("Backend request URL: {}", url);

        let start = Instant::now();
        let response = self.client.get(&url).send().await.map_err(network_error)?;
        let attractions: Vec<Attraction> = decode(response).await?;

        info!(
            "Fetched {} attractions in {:.3}s",
            attractions.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(attractions)
    }

    /// Ask the backend for an itinerary
    #[instrument(skip(self, request), fields(budget = %request.budget, duration = request.duration))]
    pub async fn submit(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        let url = format!("{}/api/recommendations", self.base_url);
        debug!("Backend request URL: {}", url);

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;
        let itinerary: RecommendationResponse = decode(response).await?;

        let elapsed = start.elapsed();
        info!(
            "Received itinerary with {} stops in {:.3}s",
            itinerary.len(),
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow backend response: {:.3}s", elapsed.as_secs_f64());
        }
        Ok(itinerary)
    }
}

impl RecommendationBackend for RecommendationClient {
    async fn submit(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        RecommendationClient::submit(self, request).await
    }
}

fn network_error(err: reqwest::Error) -> TourismError {
    warn!("Backend unreachable: {}", err);
    TourismError::request_failed(err.status().map(|s| s.as_u16()), err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;

    if !status.is_success() {
        warn!("Backend answered {}: {}", status, body);
        return Err(TourismError::request_failed(Some(status.as_u16()), body));
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!("Undecodable backend response: {}", e);
        TourismError::request_failed(Some(status.as_u16()), format!("invalid response body: {e}"))
    })
}
