//! Canonical calendar-day key.
//!
//! # Responsibility
//! - Identify one calendar day in the note collection and on disk.
//! - Own the strict `YYYY-MM-DD` parse/format contract.
//!
//! # Invariants
//! - `DateKey::parse(&key.to_string()) == Ok(key)` for every constructed key.
//! - Only four-digit years (`0000..=9999`) are representable.
//! - Ordering is chronological, so ordered maps serialize deterministically.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const MAX_YEAR: i32 = 9999;

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

/// Date key parse/construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input is not shaped like `YYYY-MM-DD`.
    Format(String),
    /// Input is shaped correctly but names no real calendar day.
    InvalidDate(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(value) => write!(f, "date key `{value}` is not in YYYY-MM-DD form"),
            Self::InvalidDate(value) => write!(f, "date key `{value}` is not a calendar date"),
        }
    }
}

impl Error for DateKeyError {}

/// One calendar day, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// - `Format` when digits are missing or padded differently (`2024-1-1`).
    /// - `InvalidDate` for impossible days (`2023-02-29`).
    pub fn parse(value: &str) -> Result<Self, DateKeyError> {
        if !DATE_KEY_RE.is_match(value) {
            return Err(DateKeyError::Format(value.to_string()));
        }
        NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyError::InvalidDate(value.to_string()))
    }

    /// Builds a key from numeric components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateKeyError> {
        let rendered = format!("{year:04}-{month:02}-{day:02}");
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(DateKeyError::Format(rendered));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateKeyError::InvalidDate(rendered))
    }

    /// Returns the key for the local current day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Returns the underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<NaiveDate> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_ymd(value.year(), value.month(), value.day())
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{DateKey, DateKeyError};
    use chrono::NaiveDate;

    #[test]
    fn parse_and_display_are_stable() {
        let key = DateKey::parse("2024-03-01").unwrap();
        assert_eq!(key.to_string(), "2024-03-01");
        assert_eq!(DateKey::parse(&key.to_string()).unwrap(), key);
    }

    #[test]
    fn parse_rejects_unpadded_components() {
        assert!(matches!(
            DateKey::parse("2024-3-1"),
            Err(DateKeyError::Format(_))
        ));
        assert!(matches!(
            DateKey::parse(" 2024-03-01"),
            Err(DateKeyError::Format(_))
        ));
    }

    #[test]
    fn parse_rejects_impossible_days() {
        assert!(matches!(
            DateKey::parse("2023-02-29"),
            Err(DateKeyError::InvalidDate(_))
        ));
        assert!(DateKey::parse("2024-02-29").is_ok());
    }

    #[test]
    fn from_ymd_rejects_five_digit_years() {
        assert!(DateKey::from_ymd(10_000, 1, 1).is_err());
        let early = DateKey::from_ymd(987, 6, 5).unwrap();
        assert_eq!(early.to_string(), "0987-06-05");
        assert_eq!(DateKey::parse("0987-06-05").unwrap(), early);
    }

    #[test]
    fn try_from_naive_date_keeps_the_day() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let key = DateKey::try_from(date).unwrap();
        assert_eq!(key.date(), date);
    }

    #[test]
    fn ordering_is_chronological() {
        let earlier = DateKey::parse("2023-12-31").unwrap();
        let later = DateKey::parse("2024-01-01").unwrap();
        assert!(earlier < later);
    }
}
