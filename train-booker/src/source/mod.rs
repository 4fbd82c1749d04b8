//! Offer sources.
//!
//! An offer source turns a search query into train offers. Variants:
//! - [`SyntheticSource`] fabricates randomized offers locally
//! - [`LiveSource`] queries a transit routing API and normalizes the result
//! - [`FixtureSource`] replays a routing response recorded to disk
//!
//! [`crate::cache::CachedSource`] wraps any of them with a TTL cache.

mod convert;
mod error;
mod fixture;
mod live;
mod synthetic;
mod types;

use std::future::Future;

pub use convert::{fare_from_dto, normalize_route, normalize_routes};
pub use error::{SetupError, SourceError};
pub use fixture::FixtureSource;
pub use live::{DEFAULT_BASE_URL, LiveConfig, LiveSource};
pub use synthetic::{SyntheticConfig, SyntheticSource, TRAIN_NAMES, generate_offers};
pub use types::{DurationDto, FareDto, LegDto, RouteDto, RoutesResponse, StopTimeDto};

use crate::cache::CachedSource;
use crate::domain::{SearchQuery, TrainOffer};

/// Something that can produce offers for a query.
///
/// Implementations receive queries that have already been validated.
pub trait OfferSource {
    /// Fetch offers for `query`.
    fn fetch(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<TrainOffer>, SourceError>> + Send;
}

/// The non-synthetic source picked by configuration.
pub enum ExternalSource {
    Live(CachedSource<LiveSource>),
    Fixture(FixtureSource),
}

impl OfferSource for ExternalSource {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
        match self {
            ExternalSource::Live(source) => source.fetch(query).await,
            ExternalSource::Fixture(source) => source.fetch(query).await,
        }
    }
}
