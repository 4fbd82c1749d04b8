//! Booking a fare class on a selected offer.
//!
//! Nothing is reserved or stored: a booking request is validated against
//! the offer it names and priced into a confirmation summary.

use serde::{Deserialize, Serialize};

use super::{ClassCode, PassengerEntry, ProfileStore, TrainOffer};

/// Most passengers allowed on one booking.
pub const MAX_PASSENGERS: usize = 6;

/// Errors from validating a booking request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("at least one passenger is required")]
    NoPassengers,

    #[error("at most {} passengers can be booked together", MAX_PASSENGERS)]
    TooManyPassengers,

    #[error("passenger {index}: invalid {field}")]
    InvalidPassenger { index: usize, field: &'static str },

    #[error("passenger {index}: no saved profile {id:?}")]
    UnknownProfile { index: usize, id: String },

    #[error("train {train} has no {code} fare class")]
    UnknownClass { train: String, code: ClassCode },
}

impl BookingError {
    /// Path of the offending request field.
    pub fn field(&self) -> String {
        match self {
            BookingError::NoPassengers | BookingError::TooManyPassengers => "passengers".into(),
            BookingError::InvalidPassenger { index, field } => format!("passengers[{index}].{field}"),
            BookingError::UnknownProfile { index, .. } => format!("passengers[{index}].profileId"),
            BookingError::UnknownClass { .. } => "classCode".into(),
        }
    }
}

/// Passengers for one fare class on a chosen offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub train: TrainOffer,
    pub class_code: ClassCode,
    /// Typed-in details or saved profile references.
    pub passengers: Vec<PassengerEntry>,
}

/// Priced summary of a valid booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub train_number: String,
    pub train_name: String,
    pub route: String,
    pub class_code: ClassCode,
    pub passenger_count: usize,
    /// Names as booked, with saved profiles expanded.
    pub passenger_names: Vec<String>,
    pub fare_per_passenger: u32,
    pub total_fare: u64,
    /// Availability at the time of booking, e.g. "RAC (2)".
    pub status: String,
}

impl BookingRequest {
    /// Validate the request and price it. Profile references are expanded
    /// from `profiles` before the passenger checks run.
    pub fn confirm(&self, profiles: &ProfileStore) -> Result<BookingConfirmation, BookingError> {
        if self.passengers.is_empty() {
            return Err(BookingError::NoPassengers);
        }
        if self.passengers.len() > MAX_PASSENGERS {
            return Err(BookingError::TooManyPassengers);
        }

        let mut passenger_names = Vec::with_capacity(self.passengers.len());
        for (index, entry) in self.passengers.iter().enumerate() {
            let passenger = match entry {
                PassengerEntry::Details(details) => details,
                PassengerEntry::Saved { profile_id } => profiles
                    .get(profile_id)
                    .map(|profile| &profile.details)
                    .ok_or_else(|| BookingError::UnknownProfile {
                        index,
                        id: profile_id.clone(),
                    })?,
            };
            passenger
                .check()
                .map_err(|field| BookingError::InvalidPassenger {
                    index,
                    field: field.as_str(),
                })?;
            passenger_names.push(passenger.name.trim().to_string());
        }

        let fare = self
            .train
            .fare(&self.class_code)
            .ok_or_else(|| BookingError::UnknownClass {
                train: self.train.number.clone(),
                code: self.class_code.clone(),
            })?;

        let passenger_count = self.passengers.len();
        Ok(BookingConfirmation {
            train_number: self.train.number.clone(),
            train_name: self.train.name.clone(),
            route: self.train.route_summary(),
            class_code: fare.code.clone(),
            passenger_count,
            passenger_names,
            fare_per_passenger: fare.price,
            total_fare: u64::from(fare.price) * passenger_count as u64,
            status: fare.availability.to_string(),
        })
    }
}
