//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{SavedProfile, SearchQuery, TrainOffer, TravelClass};
use crate::search::SearchOutcome;

/// Query string of a train search.
///
/// Every field is optional here so that a missing parameter is reported as
/// a validation error with its field name, not as a bare extractor failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Origin station name
    pub origin: Option<String>,

    /// Destination station name
    pub destination: Option<String>,

    /// Journey date, YYYY-MM-DD
    pub date: Option<String>,

    /// Travel class label (e.g. "Sleeper", "2AC")
    pub class_type: Option<String>,

    /// Force synthetic offers
    pub use_mock_data: Option<bool>,
}

impl SearchParams {
    /// Convert into a search query. Missing fields become empty strings and
    /// are rejected by validation.
    pub fn into_query(self) -> SearchQuery {
        let travel_class = self
            .class_type
            .as_deref()
            .map(TravelClass::from_label)
            .unwrap_or_default();

        SearchQuery::new(
            self.origin.unwrap_or_default(),
            self.destination.unwrap_or_default(),
            self.date.unwrap_or_default(),
            travel_class,
        )
        .with_mock(self.use_mock_data.unwrap_or(false))
    }
}

/// Response for a train search.
#[derive(Debug, Serialize)]
pub struct TrainSearchResponse {
    /// Number of trains found
    pub count: usize,

    /// Matching trains, requested class first in each
    pub trains: Vec<TrainOffer>,

    /// Set when the search could not reach its source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl TrainSearchResponse {
    pub fn from_outcome(outcome: SearchOutcome) -> Self {
        let notice = outcome.notice().map(str::to_string);
        let trains = outcome.into_offers();
        Self {
            count: trains.len(),
            trains,
            notice,
        }
    }
}

/// A travel class the user can pick.
#[derive(Debug, Serialize)]
pub struct ClassOption {
    /// Display label
    pub label: String,

    /// Fare class code it maps to
    pub code: String,
}

impl ClassOption {
    pub fn from_class(class: &TravelClass) -> Self {
        Self {
            label: class.label().to_string(),
            code: class.code().as_str().to_string(),
        }
    }
}

/// Response listing travel classes.
#[derive(Debug, Serialize)]
pub struct ClassesResponse {
    pub classes: Vec<ClassOption>,
}

/// Response listing saved traveller profiles.
#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<SavedProfile>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Offending request field, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
