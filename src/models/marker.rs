//! Map-display projection of attractions and the default icon policy

use serde::{Deserialize, Serialize};

use super::{Attraction, Coordinates, TourismCategory};

const ICON_BASE_URL: &str = "https://maps.google.com/mapfiles/ms/icons/";

/// Point shown on the map, one per displayed attraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionMarker {
    /// Unique within one displayed set
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub category: TourismCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl AttractionMarker {
    #[must_use]
    pub fn position(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// Explicit icon if one was supplied, otherwise the category default
    #[must_use]
    pub fn icon(&self) -> String {
        match &self.icon_url {
            Some(url) => url.clone(),
            None => default_icon(&self.category).url(),
        }
    }
}

impl From<&Attraction> for AttractionMarker {
    fn from(attraction: &Attraction) -> Self {
        Self {
            id: attraction.id.clone(),
            lat: attraction.location.lat,
            lng: attraction.location.lng,
            name: attraction.name.clone(),
            category: attraction.display_category(),
            icon_url: None,
        }
    }
}

/// Standard dot icons offered by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Red,
    Green,
    Blue,
    Yellow,
}

impl MarkerIcon {
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            MarkerIcon::Red => "red",
            MarkerIcon::Green => "green",
            MarkerIcon::Blue => "blue",
            MarkerIcon::Yellow => "yellow",
        }
    }

    #[must_use]
    pub fn url(self) -> String {
        format!("{ICON_BASE_URL}{}-dot.png", self.color())
    }
}

/// Icon for a category. Total: every category resolves.
#[must_use]
pub fn default_icon(category: &TourismCategory) -> MarkerIcon {
    match category {
        TourismCategory::Museum => MarkerIcon::Red,
        TourismCategory::Park => MarkerIcon::Green,
        TourismCategory::Restaurant => MarkerIcon::Blue,
        TourismCategory::Monument
        | TourismCategory::Gallery
        | TourismCategory::Religious
        | TourismCategory::Shopping
        | TourismCategory::Gastronomy
        | TourismCategory::Adventure
        | TourismCategory::Family
        | TourismCategory::Generic
        | TourismCategory::Custom(_) => MarkerIcon::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("museum", "https://maps.google.com/mapfiles/ms/icons/red-dot.png")]
    #[case("park", "https://maps.google.com/mapfiles/ms/icons/green-dot.png")]
    #[case("restaurant", "https://maps.google.com/mapfiles/ms/icons/blue-dot.png")]
    #[case("spa", "https://maps.google.com/mapfiles/ms/icons/yellow-dot.png")]
    #[case("gallery", "https://maps.google.com/mapfiles/ms/icons/yellow-dot.png")]
    #[case("", "https://maps.google.com/mapfiles/ms/icons/yellow-dot.png")]
    #[case("generic", "https://maps.google.com/mapfiles/ms/icons/yellow-dot.png")]
    fn test_default_icon_is_total(#[case] category: &str, #[case] expected: &str) {
        let icon = default_icon(&TourismCategory::from(category)).url();
        assert!(!icon.is_empty());
        assert_eq!(icon, expected);
    }

    #[test]
    fn test_explicit_icon_wins() {
        let marker = AttractionMarker {
            id: "1".to_string(),
            lat: 40.4168,
            lng: -3.7038,
            name: "Palacio Real".to_string(),
            category: TourismCategory::Park,
            icon_url: Some("https://example.com/palace.png".to_string()),
        };
        assert_eq!(marker.icon(), "https://example.com/palace.png");

        let plain = AttractionMarker {
            icon_url: None,
            ..marker
        };
        assert_eq!(plain.icon(), MarkerIcon::Green.url());
    }

    #[test]
    fn test_marker_wire_format() {
        let marker: AttractionMarker = serde_json::from_str(
            r#"{"id": "2", "lat": 40.4135, "lng": -3.6921, "name": "Parque del Retiro", "category": "park"}"#,
        )
        .unwrap();
        assert_eq!(marker.category, TourismCategory::Park);
        assert!(marker.icon_url.is_none());
        assert_eq!(marker.position(), Coordinates { lat: 40.4135, lng: -3.6921 });
    }
}
