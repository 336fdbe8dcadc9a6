//! Recommendation request/response contract

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Attraction, TourismCategory};
use crate::{Result, TourismError};

/// Spending level chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

impl Budget {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        }
    }
}

impl FromStr for Budget {
    type Err = TourismError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Budget::Low),
            "medium" => Ok(Budget::Medium),
            "high" => Ok(Budget::High),
            other => Err(TourismError::validation(format!(
                "budget '{other}' must be one of: low, medium, high"
            ))),
        }
    }
}

impl Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferences sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub interests: BTreeSet<TourismCategory>,
    /// Available time in hours
    pub duration: f64,
    pub budget: Budget,
}

impl RecommendationRequest {
    /// Build a request, rejecting non-positive or non-finite durations
    pub fn new<I, C>(interests: I, duration: f64, budget: Budget) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<TourismCategory>,
    {
        let request = Self {
            interests: interests.into_iter().map(Into::into).collect(),
            duration,
            budget,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(TourismError::validation(format!(
                "duration must be a positive number of hours, got {}",
                self.duration
            )));
        }
        Ok(())
    }

    /// Available time in whole minutes
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        (self.duration * 60.0).floor() as u32
    }
}

/// Itinerary in visiting order
pub type RecommendationResponse = Vec<Attraction>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_request_wire_format() {
        let request = RecommendationRequest::new(["cultural"], 4.0, Budget::Medium).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"interests": ["cultural"], "duration": 4.0, "budget": "medium"})
        );
    }

    #[test]
    fn test_interests_are_a_set() {
        let request =
            RecommendationRequest::new(["food", "cultural", "food"], 2.5, Budget::Low).unwrap();
        assert_eq!(request.interests.len(), 2);
        assert_eq!(request.duration_minutes(), 150);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_duration(#[case] duration: f64) {
        let result = RecommendationRequest::new(Vec::<&str>::new(), duration, Budget::High);
        assert!(matches!(result, Err(TourismError::Validation { .. })));
    }

    #[rstest]
    #[case("low", Budget::Low)]
    #[case("medium", Budget::Medium)]
    #[case("high", Budget::High)]
    fn test_budget_parse(#[case] raw: &str, #[case] expected: Budget) {
        assert_eq!(raw.parse::<Budget>().unwrap(), expected);
    }

    #[test]
    fn test_budget_parse_rejects_unknown() {
        assert!("luxury".parse::<Budget>().is_err());
        assert!(serde_json::from_str::<Budget>(r#""luxury""#).is_err());
    }
}
