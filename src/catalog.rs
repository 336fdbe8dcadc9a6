//! Attraction catalog loading
//!
//! The catalog is a JSON array of attractions in the backend wire format.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::models::Attraction;
use crate::{Result, TourismError};

/// Parse and validate a catalog document
pub fn parse(json: &str) -> Result<Vec<Attraction>> {
    let attractions: Vec<Attraction> = serde_json::from_str(json)
        .map_err(|e| TourismError::validation(format!("malformed attraction catalog: {e}")))?;

    let mut seen = HashSet::with_capacity(attractions.len());
    for attraction in &attractions {
        attraction.validate()?;
        if !seen.insert(attraction.id.as_str()) {
            return Err(TourismError::validation(format!(
                "duplicate attraction id '{}'",
                attraction.id
            )));
        }
    }
    Ok(attractions)
}

/// Load the catalog from a JSON file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Attraction>> {
    let path = path.as_ref();
    debug!("Loading attraction catalog from {}", path.display());
    let json = fs::read_to_string(path)?;
    let attractions = parse(&json)?;
    info!(
        "Loaded {} attractions from {}",
        attractions.len(),
        path.display()
    );
    Ok(attractions)
}

/// Load the catalog, or start empty when the file does not exist
pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Vec<Attraction>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(
            "Attraction catalog not found at {}, serving an empty catalog",
            path.display()
        );
        return Ok(Vec::new());
    }
    load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{
        "id": "ID",
        "name": "Museo del Prado",
        "location": {"lat": 40.4138, "lng": -3.6921},
        "categories": ["museum"],
        "openingHours": {"weekdays": {"open": 10, "close": 20}, "daysOpen": [0, 1, 2, 3, 4, 5, 6]},
        "price": {"adult": 15, "senior": 7.5, "currency": "EUR"},
        "averageVisitDuration": 180,
        "popularity": 10
    }"#;

    fn catalog_of(ids: &[&str]) -> String {
        let entries: Vec<String> = ids.iter().map(|id| ENTRY.replace("ID", id)).collect();
        format!("[{}]", entries.join(","))
    }

    #[test]
    fn test_parse_catalog() {
        let attractions = parse(&catalog_of(&["1", "2"])).unwrap();
        assert_eq!(attractions.len(), 2);
        assert_eq!(attractions[1].id, "2");
        assert_eq!(attractions[0].price.senior, Some(7.5));
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let result = parse(&catalog_of(&["1", "1"]));
        assert!(matches!(result, Err(TourismError::Validation { .. })));
    }

    #[test]
    fn test_parse_rejects_invalid_records() {
        let broken = catalog_of(&["1"]).replace("\"popularity\": 10", "\"popularity\": 0");
        assert!(parse(&broken).is_err());
        assert!(parse("{not json").is_err());
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let path = std::env::temp_dir().join("tourist-map-no-such-catalog.json");
        assert!(load_or_empty(&path).unwrap().is_empty());
        assert!(matches!(load(&path), Err(TourismError::Io { .. })));
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let attractions = load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/attractions.json")).unwrap();
        assert!(!attractions.is_empty());
    }
}
