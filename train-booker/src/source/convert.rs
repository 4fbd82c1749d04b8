//! Normalization of routing API responses into offers.
//!
//! A missing field in a routing API response takes a default, never an
//! error. Only a body with no `routes` at all is treated as an
//! unexpected shape, and that yields an empty result.

use std::collections::HashSet;

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Availability, ClassCode, ClockTime, FareClass, SearchQuery, TrainOffer, TripDuration};

use super::synthetic::placeholder_fare;
use super::types::{FareDto, LegDto, RouteDto, RoutesResponse};

/// Fare price used when an entry has no (or a zero) amount.
const DEFAULT_FARE_PRICE: u32 = 500;

/// First train number handed out to routes that report none.
const FIRST_PLACEHOLDER_NUMBER: usize = 10000;

/// Convert a routes response to offers for `query`.
pub fn normalize_routes<R: Rng>(
    response: &RoutesResponse,
    query: &SearchQuery,
    rng: &mut R,
) -> Vec<TrainOffer> {
    let Some(routes) = response.routes.as_deref() else {
        warn!("routing response has no routes array");
        return Vec::new();
    };
    debug!(count = routes.len(), "normalizing routes");

    let mut seen_ids = HashSet::with_capacity(routes.len());
    routes
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let mut offer = normalize_route(route, index, query, rng);
            offer.id = unique_id(&mut seen_ids, offer.id, index);
            offer
        })
        .collect()
}

/// Claim `id` in `seen`, suffixing it until it is unused: `x`, then
/// `x-{index+1}`, then `x-{index+1}-2` and so on.
fn unique_id(seen: &mut HashSet<String>, id: String, index: usize) -> String {
    if seen.insert(id.clone()) {
        return id;
    }
    let base = format!("{id}-{}", index + 1);
    let mut candidate = base.clone();
    let mut n = 2;
    while !seen.insert(candidate.clone()) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

/// Convert one route. `index` is its position in the response.
pub fn normalize_route<R: Rng>(
    route: &RouteDto,
    index: usize,
    query: &SearchQuery,
    rng: &mut R,
) -> TrainOffer {
    let id = route
        .route_id
        .clone()
        .unwrap_or_else(|| format!("train-{}", index + 1));
    let number = route
        .train_number
        .clone()
        .unwrap_or_else(|| (FIRST_PLACEHOLDER_NUMBER + index).to_string());
    let name = route
        .name
        .clone()
        .unwrap_or_else(|| format!("Train {number}"));

    let leg = route.legs.first();
    let departure_time = leg_time(leg.and_then(|l| l.departure.as_ref()?.time.as_deref()));
    let arrival_time = leg_time(leg.and_then(|l| l.arrival.as_ref()?.time.as_deref()));
    let duration = TripDuration::from_minutes(leg_duration(leg));

    let requested = query.travel_class.code();
    let mut fare_classes = route
        .fare
        .as_ref()
        .and_then(|value| value.as_array())
        .map(|entries| entries.iter().filter_map(parse_fare).collect::<Vec<_>>())
        .unwrap_or_default();
    if fare_classes.is_empty() {
        fare_classes.push(placeholder_fare(requested.clone(), rng));
    }

    let mut offer = TrainOffer {
        id,
        number,
        name,
        departure_time,
        arrival_time,
        duration,
        origin_name: query.origin.clone(),
        destination_name: query.destination.clone(),
        fare_classes,
    };
    offer.promote_fare(&requested);
    offer
}

fn leg_time(time: Option<&str>) -> ClockTime {
    match time {
        Some(s) => ClockTime::parse_hhmm(s).unwrap_or_else(|e| {
            debug!(time = s, error = %e, "unparsable leg time");
            ClockTime::MIDNIGHT
        }),
        None => ClockTime::MIDNIGHT,
    }
}

fn leg_duration(leg: Option<&LegDto>) -> u32 {
    leg.and_then(|l| l.duration.as_ref())
        .and_then(|d| d.value)
        .unwrap_or(0)
}

/// Map one fare entry. Entries that are not objects are skipped.
fn parse_fare(value: &serde_json::Value) -> Option<FareClass> {
    let dto = match FareDto::deserialize(value) {
        Ok(dto) => dto,
        Err(e) => {
            debug!(error = %e, "skipping malformed fare entry");
            return None;
        }
    };
    Some(fare_from_dto(&dto))
}

/// Map a fare entry, resolving contradictory detail fields by the reported
/// availability.
pub fn fare_from_dto(dto: &FareDto) -> FareClass {
    let code = dto
        .class
        .as_deref()
        .map(ClassCode::parse)
        .unwrap_or(ClassCode::Sleeper);
    let price = dto
        .amount
        .filter(|&amount| amount > 0)
        .unwrap_or(DEFAULT_FARE_PRICE);

    let availability = match dto
        .availability
        .as_deref()
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("rac") => Availability::Rac { seats: dto.seats },
        Some("waitlist") | Some("waitlisted") => Availability::Waitlisted {
            position: dto.waitlist.filter(|&p| p > 0),
        },
        _ => Availability::Available { seats: dto.seats },
    };

    FareClass::new(code, price, availability)
}
