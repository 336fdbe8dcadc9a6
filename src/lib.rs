//! `TouristMap` - Attraction maps and itinerary recommendations
//!
//! This library provides the attraction data model, the live map view that keeps
//! provider markers in sync with it, the recommendation request contract, and the
//! backend that answers those requests.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod map;
pub mod models;
pub mod recommender;
pub mod results;
pub mod search;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use client::{RecommendationBackend, RecommendationClient};
pub use config::TourismConfig;
pub use error::TourismError;
pub use map::{HeadlessProvider, MapProvider, MapSdk, MapView, Selection};
pub use models::{
    Attraction, AttractionMarker, Budget, Coordinates, RecommendationRequest,
    RecommendationResponse, TourismCategory,
};
pub use recommender::{CatalogRecommender, Recommender};
pub use results::{ResultsPresentation, ResultsView};
pub use search::{PreferenceForm, SearchSession, Submission};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourismError>;
