//! Preference form and submission session

use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::client::RecommendationBackend;
use crate::models::{Budget, RecommendationRequest, RecommendationResponse};
use crate::{Result, TourismError};

/// Interest choices offered by the form as `(tag, label)`
pub const INTEREST_OPTIONS: [(&str, &str); 3] = [
    ("cultural", "Cultural"),
    ("nature", "Naturaleza"),
    ("food", "Gastronomía"),
];

/// Raw form input, as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceForm {
    pub interests: Vec<String>,
    /// Available time in hours
    pub duration: String,
    pub budget: String,
}

impl Default for PreferenceForm {
    fn default() -> Self {
        Self {
            interests: Vec::new(),
            duration: "4".to_string(),
            budget: Budget::default().as_str().to_string(),
        }
    }
}

impl PreferenceForm {
    /// Toggle an interest tag on or off
    pub fn toggle_interest(&mut self, tag: &str) {
        if let Some(index) = self.interests.iter().position(|t| t == tag) {
            self.interests.remove(index);
        } else {
            self.interests.push(tag.to_string());
        }
    }

    pub fn to_request(&self) -> Result<RecommendationRequest> {
        let duration: f64 = self.duration.trim().parse().map_err(|_| {
            TourismError::validation(format!("duration '{}' is not a number", self.duration))
        })?;
        let budget: Budget = self.budget.trim().parse()?;

        RecommendationRequest::new(self.interests.iter().map(String::as_str), duration, budget)
    }
}

/// Outcome of a session submission
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The response belongs to the latest submission
    Current(RecommendationResponse),
    /// A newer submission or a cancel happened while this one was in flight
    Superseded,
}

/// Submits forms to a backend and discards responses that arrive out of turn
pub struct SearchSession<B> {
    backend: B,
    generation: Cell<u64>,
}

impl<B: RecommendationBackend> SearchSession<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            generation: Cell::new(0),
        }
    }

    /// Validate the form and submit it. Validation errors never reach the backend.
    pub async fn submit(&self, form: &PreferenceForm) -> Result<Submission> {
        let request = form.to_request()?;
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        debug!("Submitting recommendation request #{}", ticket);

        let outcome = self.backend.submit(&request).await;

        if self.generation.get() != ticket {
            info!("Discarding response for superseded request #{}", ticket);
            return Ok(Submission::Superseded);
        }

        match outcome {
            Ok(itinerary) => Ok(Submission::Current(itinerary)),
            Err(e) => {
                warn!("Recommendation request #{} failed: {}", ticket, e);
                Err(e)
            }
        }
    }

    /// Invalidate any submission in flight
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
