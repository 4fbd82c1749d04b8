//! Transit routing API client.
//!
//! Queries a third-party routing endpoint for rail itineraries and
//! normalizes the response into offers.

use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, info};

use crate::domain::{SearchQuery, TrainOffer};

use super::convert::normalize_routes;
use super::types::RoutesResponse;
use super::{OfferSource, SetupError, SourceError};

/// Default routing endpoint.
pub const DEFAULT_BASE_URL: &str = "https://transit.googleapis.com/v1/routes";

/// Default number of alternative itineraries requested.
const DEFAULT_MAX_RESULTS: u32 = 50;

/// Configuration for the live source.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    /// Access credential, sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL (defaults to the production routing API)
    pub base_url: String,
    /// Alternative itineraries to request
    pub max_results: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LiveConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set how many alternatives to ask for.
    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }
}

/// Offer source backed by the routing API.
#[derive(Debug, Clone)]
pub struct LiveSource {
    http: reqwest::Client,
    config: LiveConfig,
}

impl LiveSource {
    /// Create a new client with the given configuration.
    pub fn new(config: LiveConfig) -> Result<Self, SetupError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the raw routes response for a query.
    pub async fn fetch_routes(&self, query: &SearchQuery) -> Result<RoutesResponse, SourceError> {
        // Queries are validated before they reach a source; pass anything
        // else through as entered.
        let date = query
            .formatted_date()
            .unwrap_or_else(|_| query.date.trim().to_string());
        let max_results = self.config.max_results.to_string();

        debug!(
            origin = %query.origin,
            destination = %query.destination,
            date = %date,
            class = %query.travel_class,
            "querying routing API"
        );

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("origin", query.origin.as_str()),
                ("destination", query.destination.as_str()),
                ("date", date.as_str()),
                ("mode", "train"),
                ("maxResults", max_results.as_str()),
                ("alternatives", "true"),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SourceError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SourceError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl OfferSource for LiveSource {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
        let response = self.fetch_routes(query).await?;
        let offers = normalize_routes(&response, query, &mut StdRng::from_entropy());
        info!(count = offers.len(), "routing API returned offers");
        Ok(offers)
    }
}
