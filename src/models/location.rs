//! Geographic coordinates and bounding regions

use serde::{Deserialize, Serialize};

use crate::{Result, TourismError};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = TourismError;

    fn try_from(raw: RawCoordinates) -> Result<Self> {
        Coordinates::new(raw.lat, raw.lng)
    }
}

impl Coordinates {
    /// Create coordinates, rejecting values outside the valid ranges
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(TourismError::validation(format!(
                "latitude {lat} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(TourismError::validation(format!(
                "longitude {lng} outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }

    /// Great-circle distance to another point in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.lat,
                longitude: self.lng,
            },
            haversine::Location {
                latitude: other.lat,
                longitude: other.lng,
            },
            haversine::Units::Kilometers,
        )
    }
}

/// Smallest latitude/longitude rectangle containing a set of points.
///
/// Regions crossing the antimeridian are not handled; the rectangle always spans
/// west to east through longitude 0.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl LatLngBounds {
    /// Bounds covering exactly one point
    #[must_use]
    pub fn from_point(point: Coordinates) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Bounds covering every point, `None` when the iterator is empty
    pub fn from_points<I: IntoIterator<Item = Coordinates>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Grow the bounds to include `point`
    pub fn extend(&mut self, point: Coordinates) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }

    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates {
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
            lng: (self.south_west.lng + self.north_east.lng) / 2.0,
        }
    }

    /// Latitude and longitude extent in degrees
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        (
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_range_validation() {
        assert!(Coordinates::new(40.4168, -3.7038).is_ok());
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(90.5, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.1).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_coordinates_deserialize_rejects_out_of_range() {
        let ok: Coordinates = serde_json::from_str(r#"{"lat": 40.4168, "lng": -3.7038}"#).unwrap();
        assert_eq!(ok.lat, 40.4168);

        let err = serde_json::from_str::<Coordinates>(r#"{"lat": 120.0, "lng": 0.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_bounds_contains_every_point() {
        let points = [
            Coordinates::new(40.4168, -3.7038).unwrap(),
            Coordinates::new(40.4135, -3.6921).unwrap(),
            Coordinates::new(40.4138, -3.6922).unwrap(),
        ];
        let bounds = LatLngBounds::from_points(points).unwrap();
        for point in &points {
            assert!(bounds.contains(point));
        }
        assert_eq!(bounds.south_west.lat, 40.4135);
        assert_eq!(bounds.north_east.lng, -3.6921);
        assert!(!bounds.contains(&Coordinates::new(41.0, -3.7).unwrap()));
    }

    #[test]
    fn test_bounds_from_no_points() {
        assert!(LatLngBounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_distance_km() {
        let palacio = Coordinates::new(40.4168, -3.7038).unwrap();
        let retiro = Coordinates::new(40.4135, -3.6921).unwrap();
        let distance = palacio.distance_km(&retiro);
        assert!(distance > 0.9 && distance < 1.2, "got {distance}");
        assert_eq!(palacio.distance_km(&palacio), 0.0);
    }
}
