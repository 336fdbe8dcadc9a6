//! Data models for the tourist map
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and bounding regions
//! - Attraction: Points of interest with hours, prices and reviews
//! - Marker: The map-display projection of an attraction
//! - Recommendation: The preference request and itinerary response

pub mod attraction;
pub mod location;
pub mod marker;
pub mod recommendation;

// Re-export all public types for convenient access
pub use attraction::{
    Attraction, Currency, DayOfWeek, ExceptionalDay, ExceptionalHours, OpeningHours, Price,
    Review, TimeRange, TourismCategory,
};
pub use location::{Coordinates, LatLngBounds};
pub use marker::{AttractionMarker, MarkerIcon, default_icon};
pub use recommendation::{Budget, RecommendationRequest, RecommendationResponse};
