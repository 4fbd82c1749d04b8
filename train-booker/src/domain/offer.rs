//! Train offers returned by a search.

use serde::{Deserialize, Serialize};

use super::{ClassCode, ClockTime, FareClass, TripDuration};

/// One bookable train itinerary.
///
/// Serializes to the shape the booking app consumes:
/// `{ id, number, name, departureTime, arrivalTime, duration, from, to, classes }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainOffer {
    /// Unique within one result set.
    pub id: String,

    /// Train number, e.g. "12301".
    pub number: String,

    /// Display name, e.g. "Rajdhani Express".
    pub name: String,

    pub departure_time: ClockTime,
    pub arrival_time: ClockTime,
    pub duration: TripDuration,

    #[serde(rename = "from")]
    pub origin_name: String,

    #[serde(rename = "to")]
    pub destination_name: String,

    /// Fare classes; the requested class comes first when present.
    #[serde(rename = "classes")]
    pub fare_classes: Vec<FareClass>,
}

impl TrainOffer {
    /// The first listed fare class.
    pub fn primary_fare(&self) -> Option<&FareClass> {
        self.fare_classes.first()
    }

    /// Look up a fare class by code.
    pub fn fare(&self, code: &ClassCode) -> Option<&FareClass> {
        self.fare_classes.iter().find(|f| &f.code == code)
    }

    /// Move the fare class with `code` to the front, keeping the relative
    /// order of the rest. Does nothing if no such class exists.
    pub fn promote_fare(&mut self, code: &ClassCode) {
        if let Some(idx) = self.fare_classes.iter().position(|f| &f.code == code) {
            let fare = self.fare_classes.remove(idx);
            self.fare_classes.insert(0, fare);
        }
    }

    /// "New Delhi → Mumbai Central"
    pub fn route_summary(&self) -> String {
        format!("{} → {}", self.origin_name, self.destination_name)
    }
}

/// Find an offer in a result set by id.
pub fn find_offer<'a>(offers: &'a [TrainOffer], id: &str) -> Option<&'a TrainOffer> {
    offers.iter().find(|o| o.id == id)
}
