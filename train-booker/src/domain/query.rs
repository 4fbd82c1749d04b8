//! Search queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{QueryError, TravelClass};

/// Date format the search form submits and the routing API accepts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One search submission.
///
/// Built by the caller per submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,

    /// Journey date as entered, `YYYY-MM-DD`.
    pub date: String,

    #[serde(rename = "classType", default)]
    pub travel_class: TravelClass,

    /// Force synthetic offers regardless of the configured source.
    #[serde(rename = "useMockData", default)]
    pub mock: bool,
}

impl SearchQuery {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: impl Into<String>,
        travel_class: TravelClass,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
            travel_class,
            mock: false,
        }
    }

    /// Request synthetic offers for this query.
    pub fn with_mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    /// Check the query can be submitted, returning the parsed journey date.
    ///
    /// ```
    /// use train_booker::domain::{QueryError, SearchQuery, TravelClass};
    ///
    /// let q = SearchQuery::new("New Delhi", " New Delhi ", "2023-10-15", TravelClass::Sleeper);
    /// assert_eq!(q.validate(), Err(QueryError::SameStation));
    /// ```
    pub fn validate(&self) -> Result<NaiveDate, QueryError> {
        let origin = self.origin.trim();
        let destination = self.destination.trim();

        if origin.is_empty() {
            return Err(QueryError::MissingOrigin);
        }
        if destination.is_empty() {
            return Err(QueryError::MissingDestination);
        }
        if origin == destination {
            return Err(QueryError::SameStation);
        }

        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| QueryError::InvalidDate(self.date.clone()))
    }

    /// Date formatted for outbound requests.
    ///
    /// The form already submits `YYYY-MM-DD`, which is what the routing API
    /// takes, so a valid date passes through unchanged apart from trimming.
    pub fn formatted_date(&self) -> Result<String, QueryError> {
        self.validate().map(|d| d.format(DATE_FORMAT).to_string())
    }

    /// Key identifying equivalent queries: trimmed stations, date, class code.
    pub fn cache_key(&self) -> QueryKey {
        QueryKey {
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            date: self.date.trim().to_string(),
            class_code: self.travel_class.code().as_str().to_string(),
        }
    }
}

/// Normalized identity of a query, used for caching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub class_code: String,
}
