//! Attraction records: categories, opening hours, pricing and reviews

use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::Coordinates;
use crate::{Result, TourismError};

/// Point of interest as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: Coordinates,
    /// Ordered; the first entry is the display category
    pub categories: Vec<TourismCategory>,
    pub opening_hours: OpeningHours,
    pub price: Price,
    /// Minutes
    pub average_visit_duration: u32,
    /// 1-10
    pub popularity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

impl Attraction {
    /// Category shown on the map, `Generic` when the record has none
    #[must_use]
    pub fn display_category(&self) -> TourismCategory {
        self.categories
            .first()
            .cloned()
            .unwrap_or(TourismCategory::Generic)
    }

    /// Check the value ranges the type itself cannot express
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(TourismError::validation("attraction id cannot be empty"));
        }
        if self.average_visit_duration == 0 {
            return Err(TourismError::validation(format!(
                "attraction {}: average visit duration must be positive",
                self.id
            )));
        }
        if !(1..=10).contains(&self.popularity) {
            return Err(TourismError::validation(format!(
                "attraction {}: popularity {} outside 1-10",
                self.id, self.popularity
            )));
        }
        self.opening_hours
            .validate()
            .map_err(|e| TourismError::validation(format!("attraction {}: {e}", self.id)))?;
        for review in self.reviews.iter().flatten() {
            if !(1..=5).contains(&review.rating) {
                return Err(TourismError::validation(format!(
                    "attraction {}: review rating {} outside 1-5",
                    self.id, review.rating
                )));
            }
        }
        Ok(())
    }
}

/// Category tag: the well-known set plus anything a data source invents
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TourismCategory {
    Museum,
    Monument,
    Park,
    Gallery,
    Religious,
    Shopping,
    Gastronomy,
    Adventure,
    Family,
    Restaurant,
    /// Fallback for records without categories
    Generic,
    Custom(String),
}

impl TourismCategory {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            TourismCategory::Museum => "museum",
            TourismCategory::Monument => "monument",
            TourismCategory::Park => "park",
            TourismCategory::Gallery => "gallery",
            TourismCategory::Religious => "religious",
            TourismCategory::Shopping => "shopping",
            TourismCategory::Gastronomy => "gastronomy",
            TourismCategory::Adventure => "adventure",
            TourismCategory::Family => "family",
            TourismCategory::Restaurant => "restaurant",
            TourismCategory::Generic => "generic",
            TourismCategory::Custom(raw) => raw,
        }
    }
}

impl From<&str> for TourismCategory {
    fn from(value: &str) -> Self {
        match value {
            "museum" => TourismCategory::Museum,
            "monument" => TourismCategory::Monument,
            "park" => TourismCategory::Park,
            "gallery" => TourismCategory::Gallery,
            "religious" => TourismCategory::Religious,
            "shopping" => TourismCategory::Shopping,
            "gastronomy" => TourismCategory::Gastronomy,
            "adventure" => TourismCategory::Adventure,
            "family" => TourismCategory::Family,
            "restaurant" => TourismCategory::Restaurant,
            "generic" => TourismCategory::Generic,
            other => TourismCategory::Custom(other.to_string()),
        }
    }
}

impl From<String> for TourismCategory {
    fn from(value: String) -> Self {
        TourismCategory::from(value.as_str())
    }
}

impl From<TourismCategory> for String {
    fn from(value: TourismCategory) -> Self {
        match value {
            TourismCategory::Custom(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for TourismCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening and closing hour, 24h clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub open: u8,
    pub close: u8,
}

/// Day of week as transmitted on the wire: 0 = Sunday .. 6 = Saturday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl TryFrom<u8> for DayOfWeek {
    type Error = TourismError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => DayOfWeek::Sunday,
            1 => DayOfWeek::Monday,
            2 => DayOfWeek::Tuesday,
            3 => DayOfWeek::Wednesday,
            4 => DayOfWeek::Thursday,
            5 => DayOfWeek::Friday,
            6 => DayOfWeek::Saturday,
            other => {
                return Err(TourismError::validation(format!(
                    "day of week {other} outside 0-6"
                )));
            }
        })
    }
}

impl From<DayOfWeek> for u8 {
    fn from(value: DayOfWeek) -> Self {
        value as u8
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl DayOfWeek {
    #[must_use]
    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }
}

/// Hours for a specific calendar date, overriding the weekly schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionalDay {
    pub date: NaiveDate,
    pub hours: ExceptionalHours,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExceptionalHours {
    Open(TimeRange),
    Closed(Closed),
}

/// The literal `"closed"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Closed {
    Closed,
}

/// Weekly schedule with optional date-specific exceptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub weekdays: TimeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekends: Option<TimeRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptional_days: Vec<ExceptionalDay>,
    pub days_open: Vec<DayOfWeek>,
}

impl OpeningHours {
    /// Hours in effect on `date`, `None` when closed
    #[must_use]
    pub fn hours_on(&self, date: NaiveDate) -> Option<TimeRange> {
        if let Some(exception) = self.exceptional_days.iter().find(|day| day.date == date) {
            return match exception.hours {
                ExceptionalHours::Open(range) => Some(range),
                ExceptionalHours::Closed(_) => None,
            };
        }

        let day = DayOfWeek::from(date.weekday());
        if !self.days_open.contains(&day) {
            return None;
        }
        if day.is_weekend() {
            Some(self.weekends.unwrap_or(self.weekdays))
        } else {
            Some(self.weekdays)
        }
    }

    fn validate(&self) -> Result<()> {
        let ranges = std::iter::once(&self.weekdays)
            .chain(self.weekends.iter())
            .chain(self.exceptional_days.iter().filter_map(|d| match &d.hours {
                ExceptionalHours::Open(range) => Some(range),
                ExceptionalHours::Closed(_) => None,
            }));
        for range in ranges {
            if range.open > 23 || range.close > 23 {
                return Err(TourismError::validation(format!(
                    "opening hours {}-{} outside 0-23",
                    range.open, range.close
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }
}

/// Entrance fees per visitor group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub adult: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior: Option<f64>,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_id: String,
    /// 1-5
    pub rating: u8,
    pub comment: String,
    /// ISO-8601, either a full timestamp or a bare date
    pub date: String,
}

impl Review {
    /// Posting time; bare dates resolve to midnight UTC
    #[must_use]
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(timestamp.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }
}
