//! Conversion between Gregorian calendar dates and JD Edwards "Julian" dates.
//!
//! A JDE date is a `CYYDDD` number: a century offset from 1900, a two-digit
//! year within that century and a three-digit day of the year. The short
//! `YYDDD` form omits a zero century digit.
//!
//! ```
//! use jde_date::{CalendarDate, from_jde_date, is_valid_jde_code, to_jde_date};
//!
//! let date: CalendarDate = "2024-01-15".parse().unwrap();
//! let code = to_jde_date(date).unwrap();
//! assert_eq!(code.to_string(), "124015");
//! assert_eq!(from_jde_date(&code), date);
//! assert!(is_valid_jde_code("24366"));
//! ```

mod civil;
mod consts;
mod fields;
mod jde;
mod prelude;
mod types;

pub use consts::*;
pub use fields::{Field, FieldUpdate, LinkedFields};
pub use jde::{JdeCode, JdeError, from_jde_date, from_jde_str, is_valid_jde_code, to_jde_date};
pub use types::{Day, DayOfYear, Month, Year, days_in_month, days_in_year, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;

/// A calendar date in the proleptic Gregorian calendar, interpreted in UTC.
///
/// Every value is a real date: the components are validated on construction,
/// so there is no "invalid date" state to check for afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Invalid day of year {day} for year {year}")]
    InvalidDayOfYear { year: u16, day: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from raw components, validating each one.
    ///
    /// # Errors
    /// Returns the `ParseError` variant for the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from validated components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month.
    pub fn from_parts(year: Year, month: Month, day: u8) -> Result<Self, ParseError> {
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// January 1st of `year`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if `year` is outside `1..=MAX_YEAR`.
    pub fn first_of_year(year: u16) -> Result<Self, ParseError> {
        Self::new(year, JANUARY, MIN_DAY)
    }

    /// Builds the date that is the `ordinal`-th day of `year` (1-based).
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for an unrepresentable year and
    /// `ParseError::InvalidDayOfYear` if the year has fewer days than `ordinal`.
    pub fn from_ordinal(year: u16, ordinal: u16) -> Result<Self, ParseError> {
        let start = Self::first_of_year(year)?;
        let doy = DayOfYear::new(ordinal, year)?;
        Self::from_epoch_days(start.to_epoch_days() + i64::from(doy.get()) - 1)
    }

    /// Builds a date from a count of days since 1970-01-01.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the day count falls outside years `1..=MAX_YEAR`.
    pub fn from_epoch_days(days: i64) -> Result<Self, ParseError> {
        let (year, month, day) = civil::civil_from_days(days);
        let year = u16::try_from(year).unwrap_or(u16::MAX);
        Self::new(year, month, day)
    }

    /// Today's date in UTC.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` only if the system clock reads past year 9999.
    pub fn today() -> Result<Self, ParseError> {
        Self::from_epoch_days(civil::today_epoch_days())
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub const fn to_epoch_days(&self) -> i64 {
        civil::days_from_civil(self.year(), self.month(), self.day())
    }

    /// 1-based day of the year, counted in whole UTC days from January 1st.
    pub fn ordinal(&self) -> DayOfYear {
        let jan_1 = civil::days_from_civil(self.year(), JANUARY, MIN_DAY);
        // A valid date is at most 365 days past January 1st.
        let offset = u16::try_from(self.to_epoch_days() - jan_1).unwrap_or(u16::MAX);
        DayOfYear::from_offset(offset)
    }

    /// Encodes this date as a JDE code.
    ///
    /// # Errors
    /// Returns `JdeError::YearOutOfRange` outside `JDE_MIN_YEAR..=JDE_MAX_YEAR`.
    pub fn to_jde(&self) -> Result<JdeCode, JdeError> {
        to_jde_date(*self)
    }
}

/// Whether `text` names a real calendar date (`YYYY-MM-DD` or `MM/DD/YYYY`).
///
/// Takes the raw text rather than a parsed date, since a `CalendarDate` is
/// always valid; use `str::parse` for the reason a value was rejected.
pub fn is_valid_gregorian(text: &str) -> bool {
    text.parse::<CalendarDate>().is_ok()
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        match (has_hyphen, has_slash) {
            (true, true) => Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
            ))),
            // ISO format: YYYY-MM-DD
            (true, false) => {
                let [year, month, day] = split_three(trimmed, DATE_SEPARATOR)?;
                Self::new(parse_u16(year)?, parse_u8(month)?, parse_u8(day)?)
            }
            // Month-first format: MM/DD/YYYY
            (false, true) => {
                let [month, day, year] = split_three(trimmed, MONTH_FIRST_SEPARATOR)?;
                Self::new(parse_u16(year)?, parse_u8(month)?, parse_u8(day)?)
            }
            (false, false) => Err(ParseError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

fn split_three(s: &str, separator: char) -> Result<[&str; 3], ParseError> {
    let parts: Vec<&str> = s.split(separator).map(str::trim).collect();
    <[&str; 3]>::try_from(parts).map_err(|parts| {
        ParseError::InvalidFormat(format!(
            "Expected 2 {separator} separators, found {}",
            parts.len().saturating_sub(1)
        ))
    })
}

/// Parses an unsigned decimal, rejecting signs that `str::parse` would accept.
fn parse_u16(s: &str) -> Result<u16, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

fn parse_u8(s: &str) -> Result<u8, ParseError> {
    let value = parse_u16(s)?;
    u8::try_from(value).map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
