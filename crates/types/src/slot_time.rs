//! Appointment start/end times.
//!
//! A [`SlotTime`] is a wall-clock time with minute precision. Users and the slot catalog speak
//! `HH:MM`; the backend stores and returns `HH:MM:SS`. Both forms parse, display is always
//! `HH:MM`, and [`SlotTime::wire`] produces the backend form.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlotTimeError {
    #[error("invalid time {0:?}: expected HH:MM or HH:MM:SS")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Builds a time from hour and minute, `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parses `HH:MM` or `HH:MM:SS`. Seconds are dropped.
    pub fn parse(input: &str) -> Result<Self, SlotTimeError> {
        let trimmed = input.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| SlotTimeError::Invalid(input.to_owned()))?;

        Self::from_hm(parsed.hour(), parsed.minute())
            .ok_or_else(|| SlotTimeError::Invalid(input.to_owned()))
    }

    /// Adds minutes with clock rollover: 15:50 + 30 is 16:20.
    ///
    /// Wraps past midnight, which the half-hour catalog never reaches.
    pub fn plus_minutes(self, minutes: i64) -> Self {
        let (time, _) = self.0.overflowing_add_signed(Duration::minutes(minutes));
        Self(time)
    }

    /// `HH:MM:SS`, the form the backend stores.
    pub fn wire(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for SlotTime {
    type Err = SlotTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for SlotTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.wire())
    }
}

impl<'de> serde::Deserialize<'de> for SlotTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SlotTime::parse(&s).map_err(serde::de::Error::custom)
    }
}
