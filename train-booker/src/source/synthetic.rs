//! Synthetic offer source.
//!
//! Fabricates plausible offers for a query without any external data, for
//! development and for queries that ask for mock data. Every call draws from
//! a fresh RNG unless a seed is configured.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::{Availability, ClassCode, ClockTime, FareClass, SearchQuery, TrainOffer, TripDuration};

use super::{OfferSource, SourceError};

/// Display names, assigned to offers in order and cycled.
pub const TRAIN_NAMES: [&str; 20] = [
    "Rajdhani Express",
    "Shatabdi Express",
    "Duronto Express",
    "Garib Rath Express",
    "Jan Shatabdi Express",
    "Sampark Kranti Express",
    "Vande Bharat Express",
    "Tejas Express",
    "Humsafar Express",
    "Antyodaya Express",
    "Gatimaan Express",
    "Double Decker Express",
    "Mahamana Express",
    "Kashi Vishwanath Express",
    "Vivek Express",
    "Deccan Queen",
    "Palace on Wheels",
    "Golden Chariot",
    "Maharajas' Express",
    "Fairy Queen Express",
];

/// Default number of offers per query.
const DEFAULT_OFFER_COUNT: usize = 15;

/// Default artificial latency.
const DEFAULT_DELAY_MS: u64 = 1500;

/// Configuration for the synthetic source.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Offers produced per query
    pub offer_count: usize,
    /// Delay before returning, emulating network latency
    pub delay: Duration,
    /// Fixed RNG seed; `None` draws fresh entropy per call
    pub seed: Option<u64>,
}

impl SyntheticConfig {
    /// Set the artificial delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Use a fixed seed, making every call return the same offers.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of offers per query.
    pub fn with_offer_count(mut self, n: usize) -> Self {
        self.offer_count = n;
        self
    }
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            offer_count: DEFAULT_OFFER_COUNT,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            seed: None,
        }
    }
}

/// Offer source that makes offers up.
#[derive(Debug, Clone, Default)]
pub struct SyntheticSource {
    config: SyntheticConfig,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl OfferSource for SyntheticSource {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<TrainOffer>, SourceError> {
        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        let offers = generate_offers(query, self.config.offer_count, &mut self.rng());
        debug!(count = offers.len(), "generated synthetic offers");
        Ok(offers)
    }
}

/// Generate `count` offers for a query.
pub fn generate_offers<R: Rng>(
    query: &SearchQuery,
    count: usize,
    rng: &mut R,
) -> Vec<TrainOffer> {
    let primary_code = query.travel_class.code();

    (0..count)
        .map(|i| {
            let departure_time = random_clock_time(rng);
            let duration = TripDuration::new(rng.gen_range(2..=23), rng.gen_range(0..60));
            let arrival_time = departure_time.wrapping_add(duration);
            let number = rng.gen_range(10000..=99999u32);

            let mut fare_classes = vec![primary_fare(primary_code.clone(), rng)];
            let extra = rng.gen_range(1..=3);
            fare_classes.extend(
                primary_code
                    .others()
                    .take(extra)
                    .map(|code| additional_fare(code, rng)),
            );

            TrainOffer {
                id: (i + 1).to_string(),
                number: number.to_string(),
                name: TRAIN_NAMES[i % TRAIN_NAMES.len()].to_string(),
                departure_time,
                arrival_time,
                duration,
                origin_name: query.origin.clone(),
                destination_name: query.destination.clone(),
                fare_classes,
            }
        })
        .collect()
}

/// Placeholder fare for a route that reported no fares: Available, with a
/// seat count.
pub(crate) fn placeholder_fare<R: Rng>(code: ClassCode, rng: &mut R) -> FareClass {
    FareClass::new(
        code,
        rng.gen_range(300..=1299),
        Availability::Available {
            seats: Some(rng.gen_range(1..=50)),
        },
    )
}

fn random_clock_time<R: Rng>(rng: &mut R) -> ClockTime {
    let hour = rng.gen_range(0..24);
    let minute = rng.gen_range(0..60);
    ClockTime::from_hm(hour, minute).unwrap_or(ClockTime::MIDNIGHT)
}

/// The requested class: biased towards Available.
fn primary_fare<R: Rng>(code: ClassCode, rng: &mut R) -> FareClass {
    let price = rng.gen_range(300..=1299);
    let kind = if rng.gen_bool(0.7) {
        AvailabilityKind::Available
    } else {
        AvailabilityKind::random(rng)
    };
    FareClass::new(code, price, kind.draw(rng, 0.7))
}

fn additional_fare<R: Rng>(code: ClassCode, rng: &mut R) -> FareClass {
    let price = rng.gen_range(300..=2299);
    let kind = AvailabilityKind::random(rng);
    FareClass::new(code, price, kind.draw(rng, 0.5))
}

#[derive(Clone, Copy)]
enum AvailabilityKind {
    Available,
    Rac,
    Waitlisted,
}

impl AvailabilityKind {
    fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => AvailabilityKind::Available,
            1 => AvailabilityKind::Rac,
            _ => AvailabilityKind::Waitlisted,
        }
    }

    /// Attach the detail that belongs to this state: a seat count (with
    /// probability `seat_p`) or a waitlist position (with probability 0.3).
    fn draw<R: Rng>(self, rng: &mut R, seat_p: f64) -> Availability {
        match self {
            AvailabilityKind::Available => Availability::Available {
                seats: rng.gen_bool(seat_p).then(|| rng.gen_range(1..=50)),
            },
            AvailabilityKind::Rac => Availability::Rac {
                seats: rng.gen_bool(seat_p).then(|| rng.gen_range(1..=50)),
            },
            AvailabilityKind::Waitlisted => Availability::Waitlisted {
                position: rng.gen_bool(0.3).then(|| rng.gen_range(1..=30)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelClass;

    fn query(class: &str) -> SearchQuery {
        SearchQuery::new("New Delhi", "Mumbai Central", "2023-10-15", TravelClass::from_label(class))
            .with_mock(true)
    }

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn generates_requested_count_with_sequential_ids() {
        let offers = generate_offers(&query("Sleeper"), 15, &mut seeded(1));
        assert_eq!(offers.len(), 15);
        for (i, offer) in offers.iter().enumerate() {
            assert_eq!(offer.id, (i + 1).to_string());
            assert_eq!(offer.name, TRAIN_NAMES[i]);
        }
    }

    #[test]
    fn names_cycle_after_twenty() {
        let offers = generate_offers(&query("Sleeper"), 25, &mut seeded(2));
        assert_eq!(offers[20].name, TRAIN_NAMES[0]);
        assert_eq!(offers[24].name, TRAIN_NAMES[4]);
        for (i, offer) in offers.iter().enumerate() {
            assert_eq!(offer.name, TRAIN_NAMES[i % TRAIN_NAMES.len()]);
        }
    }

    #[test]
    fn stations_copied_verbatim() {
        let q = SearchQuery::new(" New Delhi ", "Howrah", "2023-10-15", TravelClass::Sleeper);
        let offers = generate_offers(&q, 3, &mut seeded(3));
        assert!(offers.iter().all(|o| o.origin_name == " New Delhi " && o.destination_name == "Howrah"));
    }

    #[test]
    fn primary_class_first_then_others_in_order() {
        for class in TravelClass::OPTIONS {
            let code = class.code();
            let q = SearchQuery::new("A", "B", "2023-10-15", class);
            for offer in generate_offers(&q, 15, &mut seeded(4)) {
                assert_eq!(offer.fare_classes[0].code, code);

                let rest: Vec<_> = offer.fare_classes[1..].iter().map(|f| f.code.clone()).collect();
                assert!((1..=3).contains(&rest.len()));
                let expected: Vec<_> = code.others().take(rest.len()).collect();
                assert_eq!(rest, expected);
            }
        }
    }

    #[test]
    fn unknown_class_prices_in_sleeper() {
        let offers = generate_offers(&query("Luxury"), 5, &mut seeded(5));
        assert!(offers.iter().all(|o| o.fare_classes[0].code == ClassCode::Sleeper));
    }

    #[test]
    fn same_seed_same_offers() {
        let a = generate_offers(&query("2AC"), 15, &mut seeded(9));
        let b = generate_offers(&query("2AC"), 15, &mut seeded(9));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn source_uses_config() {
        let source = SyntheticSource::new(
            SyntheticConfig::default()
                .with_delay(Duration::ZERO)
                .with_offer_count(4)
                .with_seed(7),
        );
        let first = source.fetch(&query("Sleeper")).await.unwrap();
        let second = source.fetch(&query("Sleeper")).await.unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn source_waits_before_returning() {
        let delay = Duration::from_millis(50);
        let source = SyntheticSource::new(SyntheticConfig::default().with_delay(delay));
        let started = std::time::Instant::now();
        let offers = source.fetch(&query("Sleeper")).await.unwrap();
        assert_eq!(offers.len(), DEFAULT_OFFER_COUNT);
        assert!(started.elapsed() >= delay);
    }

    #[test]
    fn config_defaults() {
        let config = SyntheticConfig::default();
        assert_eq!(config.offer_count, 15);
        assert_eq!(config.delay, Duration::from_millis(1500));
        assert_eq!(config.seed, None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TravelClass;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offers_respect_ranges(seed in any::<u64>(), class_idx in 0usize..6) {
            let class = TravelClass::OPTIONS[class_idx].clone();
            let q = SearchQuery::new("A", "B", "2023-10-15", class);
            let offers = generate_offers(&q, 15, &mut StdRng::seed_from_u64(seed));

            for offer in &offers {
                let number: u32 = offer.number.parse().unwrap();
                prop_assert!((10000..=99999).contains(&number));

                prop_assert!((2..=23).contains(&offer.duration.hours()));
                prop_assert_eq!(offer.departure_time.wrapping_add(offer.duration), offer.arrival_time);

                let (primary, rest) = offer.fare_classes.split_first().unwrap();
                prop_assert!((300..=1299).contains(&primary.price));
                for fare in rest {
                    prop_assert!((300..=2299).contains(&fare.price));
                }

                for fare in &offer.fare_classes {
                    if let Some(seats) = fare.availability.seats() {
                        prop_assert!((1..=50).contains(&seats));
                    }
                    match fare.availability {
                        Availability::Waitlisted { position } => {
                            prop_assert!(position.is_none_or(|p| (1..=30).contains(&p)));
                            prop_assert_eq!(fare.availability.seats(), None);
                        }
                        _ => {
                            prop_assert_eq!(fare.availability.waitlist_position(), None);
                        }
                    }
                }
            }
        }
    }
}
