//! Clock times and trip durations.
//!
//! Offers carry departure and arrival as "HH:MM" strings on a 24-hour clock
//! with no date attached, so arithmetic on them wraps at midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid time or duration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day on the 24-hour clock, displayed as zero-padded "HH:MM".
///
/// # Examples
///
/// ```
/// use train_booker::domain::{ClockTime, TripDuration};
///
/// let departure = ClockTime::parse_hhmm("23:10").unwrap();
/// let arrival = departure.wrapping_add(TripDuration::new(2, 30));
/// assert_eq!(arrival.to_string(), "01:40");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Midnight, used as the default when a source omits a time.
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    /// Create a time from hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// ```
    /// use train_booker::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("1430").is_err());
    /// assert!(ClockTime::parse_hhmm("14:3").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Add a trip duration, wrapping past midnight.
    ///
    /// The day overflow is discarded: only the clock reading is kept.
    pub fn wrapping_add(&self, duration: TripDuration) -> Self {
        let (time, _overflow_secs) = self.0.overflowing_add_signed(duration.to_chrono());
        Self(time)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Length of a trip in whole hours and minutes, displayed as "17h 30m".
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TripDuration {
    minutes: u32,
}

impl TripDuration {
    /// Create a duration from hours and minutes. Minutes over 59 carry.
    ///
    /// Saturates at `u32::MAX` total minutes; see [`TripDuration::checked_new`].
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            minutes: hours.saturating_mul(60).saturating_add(minutes),
        }
    }

    /// Like [`TripDuration::new`], but `None` if the total does not fit.
    pub fn checked_new(hours: u32, minutes: u32) -> Option<Self> {
        let minutes = hours.checked_mul(60)?.checked_add(minutes)?;
        Some(Self { minutes })
    }

    /// Create a duration from a total number of minutes.
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Parse the "{h}h {m}m" display form.
    ///
    /// ```
    /// use train_booker::domain::TripDuration;
    ///
    /// let d = TripDuration::parse("17h 30m").unwrap();
    /// assert_eq!(d.hours(), 17);
    /// assert_eq!(d.minutes(), 30);
    /// assert!(TripDuration::parse("17:30").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hours, minutes) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| TimeError::new("expected \"{h}h {m}m\" format"))?;

        let hours = hours
            .strip_suffix('h')
            .and_then(|h| h.parse::<u32>().ok())
            .ok_or_else(|| TimeError::new("invalid hours"))?;
        let minutes = minutes
            .strip_suffix('m')
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(|| TimeError::new("invalid minutes"))?;
        if minutes > 59 {
            return Err(TimeError::new("minutes must be 0-59"));
        }

        Self::checked_new(hours, minutes).ok_or_else(|| TimeError::new("duration too long"))
    }

    /// Whole hours.
    pub fn hours(&self) -> u32 {
        self.minutes / 60
    }

    /// Remaining minutes (0-59).
    pub fn minutes(&self) -> u32 {
        self.minutes % 60
    }

    /// Converts to a chrono Duration.
    pub fn to_chrono(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }
}

impl fmt::Debug for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripDuration({}h {}m)", self.hours(), self.minutes())
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours(), self.minutes())
    }
}

impl Serialize for TripDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TripDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
