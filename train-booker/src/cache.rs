//! Caching layer for offer sources.
//!
//! Routing API lookups are slow and rate limited, and users tend to repeat
//! a search after going back from the results list. Offers are cached per
//! normalized query (see [`SearchQuery::cache_key`]) for a short TTL.
//! Failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{QueryKey, SearchQuery, TrainOffer};
use crate::source::{OfferSource, SourceError};

/// Cached offer list.
type OffersEntry = Arc<Vec<TrainOffer>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Offer source with caching.
///
/// Wraps another `OfferSource` and caches its successful results.
pub struct CachedSource<S> {
    inner: S,
    offers: MokaCache<QueryKey, OffersEntry>,
}

impl<S: OfferSource> CachedSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let offers = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, offers }
    }

    /// Access the wrapped source for operations that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.offers.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.offers.invalidate_all();
    }
}

impl<S> OfferSource for CachedSource<S>
where
    S: OfferSource + Sync,
{
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
        let key = query.cache_key();

        if let Some(cached) = self.offers.get(&key).await {
            debug!(origin = %key.origin, destination = %key.destination, "offer cache hit");
            return Ok(cached.as_ref().clone());
        }

        let offers = self.inner.fetch(query).await?;
        self.offers.insert(key, Arc::new(offers.clone())).await;
        debug!(entries = self.cache_entry_count(), "cached offers");

        Ok(offers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelClass;
    use crate::source::{SyntheticConfig, SyntheticSource};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts fetches and fails when told to.
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
        inner: SyntheticSource,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
                inner: SyntheticSource::new(
                    SyntheticConfig::default()
                        .with_delay(Duration::ZERO)
                        .with_offer_count(3),
                ),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl OfferSource for CountingSource {
        async fn fetch(&self, query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::Status {
                    status: 503,
                    message: "unavailable".into(),
                });
            }
            self.inner.fetch(query).await
        }
    }

    fn query(origin: &str) -> SearchQuery {
        SearchQuery::new(origin, "Howrah", "2023-10-15", TravelClass::Sleeper)
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn repeated_query_served_from_cache() {
        let cached = CachedSource::new(CountingSource::new(false), &CacheConfig::default());

        let first = cached.fetch(&query("New Delhi")).await.unwrap();
        let second = cached.fetch(&query(" New Delhi ")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn different_queries_fetch_separately() {
        let cached = CachedSource::new(CountingSource::new(false), &CacheConfig::default());

        cached.fetch(&query("New Delhi")).await.unwrap();
        cached.fetch(&query("Lucknow")).await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cached = CachedSource::new(CountingSource::new(true), &CacheConfig::default());

        assert!(cached.fetch(&query("New Delhi")).await.is_err());
        assert!(cached.fetch(&query("New Delhi")).await.is_err());

        assert_eq!(cached.inner().calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedSource::new(CountingSource::new(false), &CacheConfig::default());

        cached.fetch(&query("New Delhi")).await.unwrap();
        cached.invalidate_cache();
        cached.fetch(&query("New Delhi")).await.unwrap();

        assert_eq!(cached.inner().calls(), 2);
    }
}
