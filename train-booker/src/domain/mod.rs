//! Domain types for train search and booking.
//!
//! Offers, fare classes and queries as the rest of the crate sees them.
//! Types enforce their invariants at construction time (e.g. a fare class
//! cannot be both waitlisted and carry a seat count).

mod booking;
mod class;
mod error;
mod fare;
mod offer;
mod passenger;
mod profile;
mod query;
mod time;

pub use booking::{BookingConfirmation, BookingError, BookingRequest, MAX_PASSENGERS};
pub use class::{ClassCode, TravelClass};
pub use error::QueryError;
pub use fare::{Availability, FareClass};
pub use offer::{TrainOffer, find_offer};
pub use passenger::{BerthPreference, Gender, IdType, MAX_AGE, PassengerDetails, PassengerField};
pub use profile::{PassengerEntry, ProfileStore, SavedProfile};
pub use query::{DATE_FORMAT, QueryKey, SearchQuery};
pub use time::{ClockTime, TimeError, TripDuration};
