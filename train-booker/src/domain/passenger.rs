//! Passenger details entered at booking time.

use serde::{Deserialize, Serialize};

/// Oldest age the booking form accepts.
pub const MAX_AGE: u32 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BerthPreference {
    #[default]
    #[serde(rename = "No Preference")]
    NoPreference,
    Lower,
    Middle,
    Upper,
    #[serde(rename = "Side Lower")]
    SideLower,
    #[serde(rename = "Side Upper")]
    SideUpper,
}

/// Identity document presented by the passenger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    #[default]
    Aadhaar,
    #[serde(rename = "PAN Card")]
    PanCard,
    #[serde(rename = "Driving License")]
    DrivingLicense,
    Passport,
    #[serde(rename = "Voter ID")]
    VoterId,
}

/// One traveler on a booking.
///
/// `age` is kept as typed into the form and checked by [`PassengerDetails::age`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerDetails {
    pub name: String,
    pub age: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub berth_preference: BerthPreference,
    #[serde(default)]
    pub id_type: IdType,
    pub id_number: String,
}

/// Which passenger field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerField {
    Name,
    Age,
    IdNumber,
}

impl PassengerField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerField::Name => "name",
            PassengerField::Age => "age",
            PassengerField::IdNumber => "idNumber",
        }
    }
}

impl PassengerDetails {
    /// Parsed age, if it is a whole number in `1..=MAX_AGE`.
    pub fn age(&self) -> Option<u32> {
        self.age
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|age| (1..=MAX_AGE).contains(age))
    }

    /// Check all required fields, reporting the first one that is invalid.
    pub fn check(&self) -> Result<(), PassengerField> {
        if self.name.trim().is_empty() {
            return Err(PassengerField::Name);
        }
        if self.age().is_none() {
            return Err(PassengerField::Age);
        }
        if self.id_number.trim().is_empty() {
            return Err(PassengerField::IdNumber);
        }
        Ok(())
    }
}
