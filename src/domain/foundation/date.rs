//! Calendar date value object (no time of day).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date, or the zero date when unset.
///
/// The zero date sorts before every real date. It serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub struct Date(Option<NaiveDate>);

impl Date {
    /// The zero (unset) date.
    pub const ZERO: Self = Self(None);

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::parse_field("date", value)
    }

    /// Parses a `YYYY-MM-DD` string, attributing failures to `field`.
    pub fn parse_field(field: &str, value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        // chrono accepts unpadded components; the wire format does not
        if trimmed.len() != 10 {
            return Err(ValidationError::invalid_date_format(field, value));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(|d| Self(Some(d)))
            .map_err(|_| ValidationError::invalid_date_format(field, value))
    }

    /// Builds a date from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|d| Self(Some(d)))
            .ok_or_else(|| {
                ValidationError::invalid_date_format(
                    "date",
                    format!("{:04}-{:02}-{:02}", year, month, day),
                )
            })
    }

    /// Wraps an existing chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// Returns the inner chrono date, if set.
    pub fn as_naive(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Returns true for the zero (unset) date.
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    /// Returns true if this date is strictly before `other`.
    pub fn before(&self, other: &Date) -> bool {
        self < other
    }

    /// Returns true if this date is strictly after `other`.
    pub fn after(&self, other: &Date) -> bool {
        self > other
    }

    /// Formats as "Jan 2020", the usual resume rendering.
    pub fn format_month_year(&self) -> String {
        self.0
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default()
    }

    /// Whole months from this date to `other` (zero when either is unset).
    pub fn months_until(&self, other: &Date) -> u32 {
        match (self.0, other.0) {
            (Some(a), Some(b)) if b >= a => {
                let months = (b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32;
                months.max(0) as u32
            }
            _ => 0,
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            None => Ok(()),
        }
    }
}

impl FromStr for Date {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Option<String>> for Date {
    type Error = ValidationError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(s) => Self::parse(&s),
            None => Ok(Self::ZERO),
        }
    }
}

impl From<Date> for Option<String> {
    fn from(date: Date) -> Self {
        date.0.map(|d| d.format(DATE_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let d = Date::parse("2021-03-15").unwrap();
        assert_eq!(d.to_string(), "2021-03-15");
        assert!(!d.is_zero());
    }

    #[test]
    fn rejects_other_formats() {
        for bad in ["2021/03/15", "15-03-2021", "2021-3-5", "2021-02-30", "", "yesterday"] {
            match Date::parse_field("start_date", bad) {
                Err(ValidationError::InvalidDateFormat { field, .. }) => {
                    assert_eq!(field, "start_date")
                }
                other => panic!("expected InvalidDateFormat for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn ordering_helpers() {
        let a = Date::parse("2020-01-01").unwrap();
        let b = Date::parse("2021-06-30").unwrap();
        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(!a.after(&a));
        assert!(Date::ZERO.before(&a));
    }

    #[test]
    fn zero_date_behaviour() {
        let zero = Date::default();
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "");
        assert_eq!(serde_json::to_string(&zero).unwrap(), "null");
    }

    #[test]
    fn serde_round_trip_uses_iso_strings() {
        let d: Date = serde_json::from_str("\"2019-11-01\"").unwrap();
        assert_eq!(d.format_month_year(), "Nov 2019");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2019-11-01\"");
        assert!(serde_json::from_str::<Date>("\"11/01/2019\"").is_err());
    }

    #[test]
    fn months_until_counts_whole_months() {
        let a = Date::parse("2020-01-15").unwrap();
        let b = Date::parse("2021-03-01").unwrap();
        assert_eq!(a.months_until(&b), 14);
        assert_eq!(b.months_until(&a), 0);
    }
}
