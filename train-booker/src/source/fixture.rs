//! Recorded-response offer source.
//!
//! Loads a routing API response saved to disk and serves it for every
//! query, normalized exactly as a live response would be. Useful for
//! development and demos without API access.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::domain::{SearchQuery, TrainOffer};

use super::convert::normalize_routes;
use super::types::RoutesResponse;
use super::{OfferSource, SetupError, SourceError};

/// Offer source that replays a recorded routes response.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
    response: Arc<RoutesResponse>,
}

impl FixtureSource {
    /// Load a recorded response from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path)
            .map_err(|e| SetupError::Fixture(format!("failed to read {}: {e}", path.display())))?;

        let response: RoutesResponse = serde_json::from_str(&json)
            .map_err(|e| SetupError::Fixture(format!("failed to parse {}: {e}", path.display())))?;

        if response.routes.is_none() {
            return Err(SetupError::Fixture(format!(
                "{} has no routes array",
                path.display()
            )));
        }

        info!(
            path = %path.display(),
            routes = response.routes.as_ref().map_or(0, Vec::len),
            "loaded recorded routes"
        );

        Ok(Self {
            path: path.to_path_buf(),
            response: Arc::new(response),
        })
    }

    /// File the fixture was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OfferSource for FixtureSource {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
        debug!(path = %self.path().display(), "replaying recorded routes");
        Ok(normalize_routes(&self.response, query, &mut StdRng::from_entropy()))
    }
}
