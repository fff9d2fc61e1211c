use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, JDE_BASE_CENTURY, JDE_FULL_LEN, JDE_MAX_YEAR, JDE_MIN_YEAR, JDE_SHORT_LEN,
    ParseError, types::DayOfYear,
};

const CENTURY_SCALE: u32 = 100_000;
const YEAR_SCALE: u32 = 1_000;
const YEARS_PER_CENTURY: u16 = 100;

/// A JD Edwards `CYYDDD` date.
///
/// `C` is the century offset from 1900, `YY` the year within that century and
/// `DDD` the day of the year. A value of this type always names a real date
/// between 1900-01-01 and 2899-12-31; it displays in the six-digit form even
/// when parsed from the five-digit `YYDDD` short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JdeCode(CalendarDate);

/// Error type for JDE code conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JdeError {
    /// Code is not 5 or 6 characters long.
    #[error("Invalid JDE code length: expected 5 or 6 digits, found {0}")]
    InvalidLength(usize),

    /// Code contains something other than ASCII digits.
    #[error("Invalid JDE code {0:?}: only ASCII digits are allowed")]
    NonDigit(String),

    /// Day of year is zero or past the end of the decoded year.
    #[error("Invalid JDE day of year {day} for year {year}")]
    DayOutOfRange { year: u16, day: u16 },

    /// Date falls outside the years a single century digit can express.
    #[error("Year {0} cannot be encoded as a JDE date (must be 1900-2899)")]
    YearOutOfRange(u16),

    /// Error parsing the Gregorian side of a conversion.
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

impl JdeCode {
    /// Encodes a calendar date.
    ///
    /// # Errors
    /// Returns `JdeError::YearOutOfRange` for years before 1900 or after 2899,
    /// whose century offset would not fit in one digit.
    pub fn new(date: CalendarDate) -> Result<Self, JdeError> {
        let year = date.year();
        if !(JDE_MIN_YEAR..=JDE_MAX_YEAR).contains(&year) {
            return Err(JdeError::YearOutOfRange(year));
        }
        Ok(Self(date))
    }

    /// Decodes a numeric JDE date, as stored in JDE table columns.
    ///
    /// Numbers below 100000 carry an implied zero century digit.
    ///
    /// # Errors
    /// Returns `JdeError::InvalidLength` for numbers over six digits and
    /// `JdeError::DayOutOfRange` for an impossible day of year.
    pub fn from_number(value: u32) -> Result<Self, JdeError> {
        format!("{value:0width$}", width = JDE_FULL_LEN).parse()
    }

    /// The Gregorian date this code names.
    pub const fn date(&self) -> CalendarDate {
        self.0
    }

    /// Century offset from 1900 (`0` for the 1900s, `1` for the 2000s, ...).
    #[allow(clippy::cast_possible_truncation)]
    pub const fn century(&self) -> u8 {
        (self.0.year() / YEARS_PER_CENTURY - JDE_BASE_CENTURY) as u8
    }

    /// Two-digit year within the century.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn year_of_century(&self) -> u8 {
        (self.0.year() % YEARS_PER_CENTURY) as u8
    }

    pub const fn full_year(&self) -> u16 {
        self.0.year()
    }

    pub fn day_of_year(&self) -> DayOfYear {
        self.0.ordinal()
    }

    /// Numeric form, e.g. `124015` for 2024-01-15.
    pub fn to_number(&self) -> u32 {
        u32::from(self.century()) * CENTURY_SCALE
            + u32::from(self.year_of_century()) * YEAR_SCALE
            + u32::from(self.day_of_year().get())
    }
}

/// Encodes a Gregorian date as a JDE code.
///
/// # Errors
/// Returns `JdeError::YearOutOfRange` outside 1900..=2899.
pub fn to_jde_date(date: CalendarDate) -> Result<JdeCode, JdeError> {
    let code = JdeCode::new(date);
    if let Err(err) = &code {
        log::debug!("refusing to encode {date}: {err}");
    }
    code
}

/// Decodes a JDE code into its Gregorian date.
pub const fn from_jde_date(code: &JdeCode) -> CalendarDate {
    code.date()
}

/// Validates and decodes a JDE code given as text.
///
/// # Errors
/// Returns the `JdeError` describing why `text` is not a valid code.
pub fn from_jde_str(text: &str) -> Result<CalendarDate, JdeError> {
    text.parse::<JdeCode>().map(|code| code.date())
}

/// Whether `text` is exactly 5 or 6 ASCII digits whose day of year exists in
/// the decoded year. The input is not trimmed.
pub fn is_valid_jde_code(text: &str) -> bool {
    text.parse::<JdeCode>().is_ok()
}

fn digits_value(digits: &[u8]) -> u16 {
    digits
        .iter()
        .fold(0, |acc, d| acc * 10 + u16::from(d - b'0'))
}

impl FromStr for JdeCode {
    type Err = JdeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(JdeError::NonDigit(s.to_owned()));
        }

        // The short form omits a leading zero century digit.
        let bytes = s.as_bytes();
        let (century, rest) = match bytes.len() {
            JDE_SHORT_LEN => (0, bytes),
            JDE_FULL_LEN => (digits_value(&bytes[..1]), &bytes[1..]),
            len => return Err(JdeError::InvalidLength(len)),
        };
        let year_of_century = digits_value(&rest[..2]);
        let day = digits_value(&rest[2..]);

        let year = (century + JDE_BASE_CENTURY) * YEARS_PER_CENTURY + year_of_century;
        let doy = DayOfYear::new(day, year).map_err(|_| JdeError::DayOutOfRange { year, day })?;
        let date = CalendarDate::from_ordinal(year, doy.get())?;
        log::trace!("decoded JDE code {s} as {date}");
        Ok(Self(date))
    }
}

impl TryFrom<u32> for JdeCode {
    type Error = JdeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl TryFrom<CalendarDate> for JdeCode {
    type Error = JdeError;

    fn try_from(date: CalendarDate) -> Result<Self, Self::Error> {
        Self::new(date)
    }
}

impl From<JdeCode> for CalendarDate {
    fn from(code: JdeCode) -> Self {
        code.date()
    }
}

impl fmt::Display for JdeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{}",
            self.century(),
            self.year_of_century(),
            self.day_of_year()
        )
    }
}

impl Serialize for JdeCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JdeCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
