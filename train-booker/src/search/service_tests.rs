//! Unit tests for the train search service.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use super::*;
use crate::domain::{
    Availability, ClassCode, ClockTime, FareClass, QueryError, SearchQuery, TrainOffer,
    TravelClass, TripDuration, find_offer,
};
use crate::source::{
    LiveConfig, LiveSource, OfferSource, SetupError, SourceError, SyntheticConfig,
};

fn no_delay() -> SyntheticConfig {
    SyntheticConfig::default().with_delay(Duration::ZERO)
}

fn query(origin: &str, destination: &str, class: &str) -> SearchQuery {
    SearchQuery::new(origin, destination, "2023-10-15", TravelClass::from_label(class))
}

/// Source that returns canned offers and counts calls.
struct StubSource {
    offers: Vec<TrainOffer>,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(offers: Vec<TrainOffer>) -> Self {
        Self {
            offers,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OfferSource for StubSource {
    async fn fetch(&self, _query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.offers.clone())
    }
}

/// Source that always fails.
struct FailingSource;

impl OfferSource for FailingSource {
    async fn fetch(&self, _query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
        Err(SourceError::Status {
            status: 500,
            message: "Internal Server Error".into(),
        })
    }
}

fn stub_offer(id: &str, codes: &[&str]) -> TrainOffer {
    TrainOffer {
        id: id.into(),
        number: "12951".into(),
        name: "Mumbai Rajdhani".into(),
        departure_time: ClockTime::parse_hhmm("16:35").unwrap(),
        arrival_time: ClockTime::parse_hhmm("08:35").unwrap(),
        duration: TripDuration::new(16, 0),
        origin_name: "New Delhi".into(),
        destination_name: "Mumbai Central".into(),
        fare_classes: codes
            .iter()
            .map(|c| FareClass::new(ClassCode::parse(c), 2000, Availability::Available { seats: None }))
            .collect(),
    }
}

#[tokio::test]
async fn mock_query_returns_fifteen_sleeper_offers() {
    let search = TrainSearch::synthetic_only(no_delay());
    let q = query("New Delhi", "Mumbai Central", "Sleeper").with_mock(true);

    let outcome = search.search(&q).await.unwrap();
    let offers = outcome.offers();

    assert_eq!(offers.len(), 15);
    assert!(outcome.notice().is_none());
    for offer in offers {
        assert!(!offer.fare_classes.is_empty());
        assert_eq!(offer.fare_classes[0].code.as_str(), "SL");
        assert_eq!(offer.origin_name, "New Delhi");
        assert_eq!(offer.destination_name, "Mumbai Central");
    }
}

#[tokio::test]
async fn every_class_comes_first_for_its_query() {
    let search = TrainSearch::synthetic_only(no_delay());
    for class in TravelClass::OPTIONS {
        let code = class.code();
        let q = SearchQuery::new("A", "B", "2023-10-15", class).with_mock(true);
        let outcome = search.search(&q).await.unwrap();
        assert!(outcome.offers().iter().all(|o| o.fare_classes[0].code == code));
    }
}

#[tokio::test]
async fn waitlisted_fares_never_carry_seats() {
    let search = TrainSearch::synthetic_only(no_delay());
    for _ in 0..20 {
        let outcome = search.search(&query("A", "B", "3AC")).await.unwrap();
        for fare in outcome.offers().iter().flat_map(|o| &o.fare_classes) {
            if let Availability::Waitlisted { .. } = fare.availability {
                assert_eq!(fare.availability.seats(), None);
            }
        }
    }
}

#[tokio::test]
async fn same_station_rejected_before_delay() {
    let search = TrainSearch::synthetic_only(
        SyntheticConfig::default().with_delay(Duration::from_secs(60)),
    );
    let q = query(" Howrah ", "Howrah", "Sleeper").with_mock(true);

    let result = tokio::time::timeout(Duration::from_secs(1), search.search(&q))
        .await
        .expect("validation must not wait for the synthetic delay");

    assert_eq!(result.unwrap_err(), QueryError::SameStation);
}

#[tokio::test]
async fn invalid_query_never_reaches_source() {
    let search = TrainSearch::with_source(no_delay(), StubSource::new(vec![]));

    let err = search.search(&query("", "Howrah", "Sleeper")).await.unwrap_err();
    assert_eq!(err, QueryError::MissingOrigin);

    let mut bad_date = query("A", "B", "Sleeper");
    bad_date.date = "15/10/2023".into();
    let err = search.search(&bad_date).await.unwrap_err();
    assert_eq!(err.field(), "date");

    assert_eq!(search.external().unwrap().calls(), 0);
}

#[tokio::test]
async fn source_failure_degrades_to_empty() {
    let search = TrainSearch::with_source(no_delay(), FailingSource);

    let outcome = search.search(&query("A", "B", "Sleeper")).await.unwrap();

    assert!(outcome.is_unavailable());
    assert!(outcome.offers().is_empty());
    assert_eq!(outcome.notice(), Some(SEARCH_FAILED_NOTICE));
    assert_eq!(outcome.source_error().and_then(SourceError::status), Some(500));
}

#[tokio::test]
async fn live_http_500_resolves_to_empty() {
    let router = Router::new().route(
        "/routes",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let live = LiveSource::new(LiveConfig::new("key").with_base_url(format!("http://{addr}/routes")))
        .unwrap();
    let search = TrainSearch::with_source(no_delay(), live);

    let outcome = search.search(&query("New Delhi", "Howrah", "2AC")).await.unwrap();
    assert!(outcome.into_offers().is_empty());
}

#[tokio::test]
async fn unreachable_live_source_resolves_to_empty() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let live = LiveSource::new(
        LiveConfig::new("key")
            .with_base_url(format!("http://{addr}/routes"))
            .with_timeout(2),
    )
    .unwrap();
    let search = TrainSearch::with_source(no_delay(), live);

    let outcome = search.search(&query("New Delhi", "Howrah", "2AC")).await.unwrap();
    assert!(outcome.is_unavailable());
    assert!(matches!(outcome.source_error(), Some(SourceError::Http(_))));
}

#[tokio::test]
async fn mock_flag_bypasses_external_source() {
    let search = TrainSearch::with_source(no_delay(), StubSource::new(vec![stub_offer("a", &["SL"])]));

    let outcome = search
        .search(&query("A", "B", "Sleeper").with_mock(true))
        .await
        .unwrap();
    assert_eq!(outcome.offers().len(), 15);
    assert_eq!(search.external().unwrap().calls(), 0);

    let outcome = search.search(&query("A", "B", "Sleeper")).await.unwrap();
    assert_eq!(outcome.offers().len(), 1);
    assert_eq!(search.external().unwrap().calls(), 1);
}

#[tokio::test]
async fn external_offers_reordered_and_filtered() {
    let source = StubSource::new(vec![
        stub_offer("a", &["3A", "2A", "1A"]),
        stub_offer("b", &[]),
        stub_offer("c", &["SL"]),
    ]);
    let search = TrainSearch::with_source(no_delay(), source);

    let outcome = search.search(&query("A", "B", "1AC")).await.unwrap();
    let offers = outcome.offers();

    assert_eq!(offers.len(), 2);
    assert!(find_offer(offers, "b").is_none());
    let codes: Vec<_> = find_offer(offers, "a")
        .unwrap()
        .fare_classes
        .iter()
        .map(|f| f.code.as_str())
        .collect();
    assert_eq!(codes, vec!["1A", "3A", "2A"]);
    assert_eq!(find_offer(offers, "c").unwrap().fare_classes[0].code, ClassCode::Sleeper);
}

#[tokio::test]
async fn repeated_searches_are_independent() {
    let search = TrainSearch::synthetic_only(no_delay());
    let q = query("New Delhi", "Mumbai Central", "Sleeper").with_mock(true);

    let first = search.search(&q).await.unwrap().into_offers();
    let second = search.search(&q).await.unwrap().into_offers();

    for offers in [&first, &second] {
        assert_eq!(offers.len(), 15);
        let ids: HashSet<_> = offers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), 15);
        for offer in offers.iter() {
            assert_eq!(offer.departure_time.wrapping_add(offer.duration), offer.arrival_time);
            assert!(find_offer(offers, &offer.id).is_some());
        }
    }

    // 15 offers x (time, duration, number, fares) drawn twice: identical
    // output would mean RNG state is shared between calls.
    assert_ne!(first, second);
}

#[tokio::test]
async fn seeded_config_is_reproducible() {
    let search = TrainSearch::synthetic_only(no_delay().with_seed(42));
    let q = query("A", "B", "General");

    let first = search.search(&q).await.unwrap().into_offers();
    let second = search.search(&q).await.unwrap().into_offers();
    assert_eq!(first, second);
}

#[test]
fn fixture_config_without_path_fails() {
    let mut config = SearchConfig::fixture("unused");
    config.fixture_path = None;
    assert!(matches!(
        TrainSearch::from_config(config),
        Err(SetupError::MissingFixturePath)
    ));
}

#[test]
fn synthetic_config_has_no_external_source() {
    let search = TrainSearch::from_config(SearchConfig::synthetic(no_delay())).unwrap();
    assert!(search.external().is_none());
}

#[test]
fn live_config_builds_cached_source() {
    let search = TrainSearch::from_config(SearchConfig::live(LiveConfig::new("key"))).unwrap();
    assert!(matches!(search.external(), Some(crate::source::ExternalSource::Live(_))));
}
