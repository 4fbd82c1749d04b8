//! Travel classes (what the user asks for) and fare class codes (what an
//! offer is priced in).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fare class code as printed on a ticket.
///
/// The six standard codes have their own variants. Live sources sometimes
/// report codes outside this set (e.g. "EC" for executive chair car); those
/// are kept verbatim in `Other`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ClassCode {
    /// SL
    Sleeper,
    /// 3A
    ThreeTierAc,
    /// 2A
    TwoTierAc,
    /// 1A
    FirstAc,
    /// CC
    ChairCar,
    /// GN
    General,
    /// Any code outside the standard set.
    Other(String),
}

impl ClassCode {
    /// The standard codes in their fixed enumeration order.
    pub const STANDARD: [ClassCode; 6] = [
        ClassCode::Sleeper,
        ClassCode::ThreeTierAc,
        ClassCode::TwoTierAc,
        ClassCode::FirstAc,
        ClassCode::ChairCar,
        ClassCode::General,
    ];

    /// Parse a code. Standard codes are matched case-insensitively; anything
    /// else becomes `Other` with the trimmed input.
    ///
    /// ```
    /// use train_booker::domain::ClassCode;
    ///
    /// assert_eq!(ClassCode::parse("3A"), ClassCode::ThreeTierAc);
    /// assert_eq!(ClassCode::parse("sl"), ClassCode::Sleeper);
    /// assert_eq!(ClassCode::parse("EC").as_str(), "EC");
    /// ```
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.to_ascii_uppercase().as_str() {
            "SL" => ClassCode::Sleeper,
            "3A" => ClassCode::ThreeTierAc,
            "2A" => ClassCode::TwoTierAc,
            "1A" => ClassCode::FirstAc,
            "CC" => ClassCode::ChairCar,
            "GN" => ClassCode::General,
            _ => ClassCode::Other(s.to_string()),
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        match self {
            ClassCode::Sleeper => "SL",
            ClassCode::ThreeTierAc => "3A",
            ClassCode::TwoTierAc => "2A",
            ClassCode::FirstAc => "1A",
            ClassCode::ChairCar => "CC",
            ClassCode::General => "GN",
            ClassCode::Other(code) => code,
        }
    }

    /// Standard codes other than `self`, in enumeration order.
    pub fn others(&self) -> impl Iterator<Item = ClassCode> + '_ {
        Self::STANDARD.into_iter().filter(move |c| c != self)
    }
}

impl fmt::Debug for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassCode({})", self.as_str())
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClassCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClassCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ClassCode::parse(&s))
    }
}

/// The travel class a user searches for, by its display label.
///
/// Unrecognized labels are kept in `Unknown` and map to the sleeper code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TravelClass {
    #[default]
    Sleeper,
    ThreeTierAc,
    TwoTierAc,
    FirstAc,
    ChairCar,
    General,
    Unknown(String),
}

impl TravelClass {
    /// The selectable classes, in the order the search form lists them.
    pub const OPTIONS: [TravelClass; 6] = [
        TravelClass::Sleeper,
        TravelClass::ThreeTierAc,
        TravelClass::TwoTierAc,
        TravelClass::FirstAc,
        TravelClass::ChairCar,
        TravelClass::General,
    ];

    /// Look up a class by its display label ("Sleeper", "3AC", "Chair Car"...).
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Sleeper" => TravelClass::Sleeper,
            "3AC" => TravelClass::ThreeTierAc,
            "2AC" => TravelClass::TwoTierAc,
            "1AC" => TravelClass::FirstAc,
            "Chair Car" => TravelClass::ChairCar,
            "General" => TravelClass::General,
            other => TravelClass::Unknown(other.to_string()),
        }
    }

    /// The display label.
    pub fn label(&self) -> &str {
        match self {
            TravelClass::Sleeper => "Sleeper",
            TravelClass::ThreeTierAc => "3AC",
            TravelClass::TwoTierAc => "2AC",
            TravelClass::FirstAc => "1AC",
            TravelClass::ChairCar => "Chair Car",
            TravelClass::General => "General",
            TravelClass::Unknown(label) => label,
        }
    }

    /// The fare class code offers are priced in for this travel class.
    ///
    /// ```
    /// use train_booker::domain::{ClassCode, TravelClass};
    ///
    /// assert_eq!(TravelClass::from_label("Chair Car").code(), ClassCode::ChairCar);
    /// assert_eq!(TravelClass::from_label("Luxury").code(), ClassCode::Sleeper);
    /// ```
    pub fn code(&self) -> ClassCode {
        match self {
            TravelClass::Sleeper | TravelClass::Unknown(_) => ClassCode::Sleeper,
            TravelClass::ThreeTierAc => ClassCode::ThreeTierAc,
            TravelClass::TwoTierAc => ClassCode::TwoTierAc,
            TravelClass::FirstAc => ClassCode::FirstAc,
            TravelClass::ChairCar => ClassCode::ChairCar,
            TravelClass::General => ClassCode::General,
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for TravelClass {
    fn from(label: String) -> Self {
        TravelClass::from_label(&label)
    }
}

impl From<TravelClass> for String {
    fn from(class: TravelClass) -> Self {
        class.label().to_string()
    }
}
