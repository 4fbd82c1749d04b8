//! Fare classes and seat availability.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ClassCode;

/// Seat availability for one fare class.
///
/// A seat count only exists for bookable states and a waitlist position only
/// exists for the waitlist, so a fare class can never carry both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// Confirmed seats available.
    Available { seats: Option<u32> },
    /// Reservation Against Cancellation: partial confirmation.
    Rac { seats: Option<u32> },
    /// Waitlisted.
    Waitlisted { position: Option<u32> },
}

impl Availability {
    /// Wire name of the state: "available", "rac" or "waitlist".
    pub fn kind(&self) -> &'static str {
        match self {
            Availability::Available { .. } => "available",
            Availability::Rac { .. } => "rac",
            Availability::Waitlisted { .. } => "waitlist",
        }
    }

    /// Seat count, for Available or RAC.
    pub fn seats(&self) -> Option<u32> {
        match *self {
            Availability::Available { seats } | Availability::Rac { seats } => seats,
            Availability::Waitlisted { .. } => None,
        }
    }

    /// Waitlist position, for Waitlisted.
    pub fn waitlist_position(&self) -> Option<u32> {
        match *self {
            Availability::Waitlisted { position } => position,
            _ => None,
        }
    }

    /// Whether seats can be confirmed (or RAC-confirmed) right now.
    pub fn is_bookable(&self) -> bool {
        !matches!(self, Availability::Waitlisted { .. })
    }
}

/// Short status text shown next to a fare: "Available (42)", "RAC (2)",
/// "Waitlist" or "Waitlist (WL 12)".
impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Availability::Available { seats: Some(n) } => write!(f, "Available ({n})"),
            Availability::Available { seats: None } => f.write_str("Available"),
            Availability::Rac { seats: Some(n) } => write!(f, "RAC ({n})"),
            Availability::Rac { seats: None } => f.write_str("RAC"),
            Availability::Waitlisted { position: Some(n) } => write!(f, "Waitlist (WL {n})"),
            Availability::Waitlisted { position: None } => f.write_str("Waitlist"),
        }
    }
}

/// A priced travel-class option on an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FareClassRepr", try_from = "FareClassRepr")]
pub struct FareClass {
    pub code: ClassCode,
    /// Price in whole currency units.
    pub price: u32,
    pub availability: Availability,
}

impl FareClass {
    pub fn new(code: ClassCode, price: u32, availability: Availability) -> Self {
        Self {
            code,
            price,
            availability,
        }
    }
}

/// Flat wire form: `{ type, price, availability, seats?, waitlistNumber? }`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FareClassRepr {
    #[serde(rename = "type")]
    code: ClassCode,
    price: u32,
    availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    waitlist_number: Option<u32>,
}

impl From<FareClass> for FareClassRepr {
    fn from(fare: FareClass) -> Self {
        Self {
            code: fare.code,
            price: fare.price,
            availability: fare.availability.kind().to_string(),
            seats: fare.availability.seats(),
            waitlist_number: fare.availability.waitlist_position(),
        }
    }
}

impl TryFrom<FareClassRepr> for FareClass {
    type Error = String;

    fn try_from(repr: FareClassRepr) -> Result<Self, Self::Error> {
        let availability = match repr.availability.as_str() {
            "available" | "rac" if repr.waitlist_number.is_some() => {
                return Err(format!(
                    "{} fare class cannot carry a waitlist number",
                    repr.availability
                ));
            }
            "available" => Availability::Available { seats: repr.seats },
            "rac" => Availability::Rac { seats: repr.seats },
            "waitlist" if repr.seats.is_some() => {
                return Err("waitlisted fare class cannot carry a seat count".to_string());
            }
            "waitlist" => Availability::Waitlisted {
                position: repr.waitlist_number,
            },
            other => return Err(format!("unknown availability {other:?}")),
        };

        Ok(FareClass::new(repr.code, repr.price, availability))
    }
}
