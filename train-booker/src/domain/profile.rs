//! Saved traveller profiles.
//!
//! A profile is a stored set of passenger details. A booking can name a
//! profile instead of typing the details out again.

use serde::{Deserialize, Serialize};

use super::{BerthPreference, Gender, IdType, PassengerDetails};

/// A stored traveller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProfile {
    pub id: String,
    #[serde(flatten)]
    pub details: PassengerDetails,
}

/// The set of saved profiles, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Vec<SavedProfile>,
}

impl ProfileStore {
    pub fn new(profiles: Vec<SavedProfile>) -> Self {
        Self { profiles }
    }

    /// The profiles every installation ships with.
    pub fn builtin() -> Self {
        Self::new(vec![
            SavedProfile {
                id: "1".into(),
                details: PassengerDetails {
                    name: "Rahul Sharma".into(),
                    age: "32".into(),
                    gender: Gender::Male,
                    berth_preference: BerthPreference::Lower,
                    id_type: IdType::Aadhaar,
                    id_number: "XXXX-XXXX-1234".into(),
                },
            },
            SavedProfile {
                id: "2".into(),
                details: PassengerDetails {
                    name: "Priya Singh".into(),
                    age: "28".into(),
                    gender: Gender::Female,
                    berth_preference: BerthPreference::Upper,
                    id_type: IdType::PanCard,
                    id_number: "ABCDE1234F".into(),
                },
            },
        ])
    }

    pub fn all(&self) -> &[SavedProfile] {
        &self.profiles
    }

    pub fn get(&self, id: &str) -> Option<&SavedProfile> {
        self.profiles.iter().find(|p| p.id == id.trim())
    }
}

/// One passenger on a booking request: either typed-in details or a
/// reference to a saved profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PassengerEntry {
    Saved {
        #[serde(rename = "profileId")]
        profile_id: String,
    },
    Details(PassengerDetails),
}

impl From<PassengerDetails> for PassengerEntry {
    fn from(details: PassengerDetails) -> Self {
        PassengerEntry::Details(details)
    }
}
