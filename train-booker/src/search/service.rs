//! The train search service.
//!
//! Validates a query, routes it to the synthetic generator or the
//! configured source, and applies the fail-soft policy: a source failure is
//! reported as an empty outcome with a user-facing notice, never as an
//! error. Only invalid queries are errors.

use tracing::{info, warn};

use crate::cache::CachedSource;
use crate::domain::{QueryError, SearchQuery, TrainOffer};
use crate::source::{
    ExternalSource, FixtureSource, LiveSource, OfferSource, SetupError, SourceError,
    SyntheticConfig, SyntheticSource,
};

use super::config::{SearchConfig, SourceKind};

/// Notice shown when offers could not be fetched.
pub const SEARCH_FAILED_NOTICE: &str = "Failed to search for trains. Please try again.";

/// Result of a search that passed validation.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The source answered. May be empty if it found nothing.
    Found(Vec<TrainOffer>),

    /// The source failed; there are no offers to show.
    Unavailable {
        notice: &'static str,
        error: SourceError,
    },
}

impl SearchOutcome {
    /// Offers to display (empty when unavailable).
    pub fn offers(&self) -> &[TrainOffer] {
        match self {
            SearchOutcome::Found(offers) => offers,
            SearchOutcome::Unavailable { .. } => &[],
        }
    }

    pub fn into_offers(self) -> Vec<TrainOffer> {
        match self {
            SearchOutcome::Found(offers) => offers,
            SearchOutcome::Unavailable { .. } => Vec::new(),
        }
    }

    /// User-facing notice, if the search degraded.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Unavailable { notice, .. } => Some(notice),
        }
    }

    /// The swallowed source error, if any.
    pub fn source_error(&self) -> Option<&SourceError> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Unavailable { error, .. } => Some(error),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SearchOutcome::Unavailable { .. })
    }
}

/// Train search over a synthetic generator and an optional external source.
///
/// Queries flagged as mock always go to the synthetic generator, as do all
/// queries when no external source is configured.
pub struct TrainSearch<S = ExternalSource> {
    synthetic: SyntheticSource,
    external: Option<S>,
}

impl TrainSearch<ExternalSource> {
    /// Build the service described by `config`.
    ///
    /// Fails if the configured external source cannot be set up (bad HTTP
    /// client settings, missing or unreadable fixture).
    pub fn from_config(config: SearchConfig) -> Result<Self, SetupError> {
        let synthetic = config.synthetic;
        let external = match config.source {
            SourceKind::Synthetic => None,
            SourceKind::Live => {
                let live = LiveSource::new(config.live)?;
                Some(ExternalSource::Live(CachedSource::new(live, &config.cache)))
            }
            SourceKind::Fixture => {
                let path = config.fixture_path.ok_or(SetupError::MissingFixturePath)?;
                Some(ExternalSource::Fixture(FixtureSource::load(path)?))
            }
        };

        info!(source = %config.source, "train search ready");
        Ok(Self {
            synthetic: SyntheticSource::new(synthetic),
            external,
        })
    }

    /// Synthetic offers only.
    pub fn synthetic_only(config: SyntheticConfig) -> Self {
        Self {
            synthetic: SyntheticSource::new(config),
            external: None,
        }
    }
}

impl<S: OfferSource + Sync> TrainSearch<S> {
    /// Use `external` for queries that don't ask for mock data.
    pub fn with_source(synthetic: SyntheticConfig, external: S) -> Self {
        Self {
            synthetic: SyntheticSource::new(synthetic),
            external: Some(external),
        }
    }

    /// The external source, if one is configured.
    pub fn external(&self) -> Option<&S> {
        self.external.as_ref()
    }

    /// Search for offers.
    ///
    /// Invalid queries fail with [`QueryError`] before any source is
    /// consulted. Source failures are logged and come back as
    /// [`SearchOutcome::Unavailable`].
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, QueryError> {
        query.validate()?;

        info!(
            origin = %query.origin.trim(),
            destination = %query.destination.trim(),
            date = %query.date.trim(),
            class = %query.travel_class,
            mock = query.mock,
            "searching for trains"
        );

        let result = match &self.external {
            Some(external) if !query.mock => external.fetch(query).await,
            _ => self.synthetic.fetch(query).await,
        };

        match result {
            Ok(offers) => Ok(SearchOutcome::Found(finish_offers(offers, query))),
            Err(error) => {
                warn!(%error, status = ?error.status(), "train search failed");
                Ok(SearchOutcome::Unavailable {
                    notice: SEARCH_FAILED_NOTICE,
                    error,
                })
            }
        }
    }
}

/// Put the requested class first and drop offers with nothing to book.
fn finish_offers(offers: Vec<TrainOffer>, query: &SearchQuery) -> Vec<TrainOffer> {
    let requested = query.travel_class.code();
    offers
        .into_iter()
        .filter_map(|mut offer| {
            if offer.fare_classes.is_empty() {
                warn!(id = %offer.id, "dropping offer without fare classes");
                return None;
            }
            offer.promote_fare(&requested);
            Some(offer)
        })
        .collect()
}
