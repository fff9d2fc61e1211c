use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_IN_MONTH, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR,
};
use crate::prelude::*;
use std::num::{NonZeroU8, NonZeroU16};

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        match NonZeroU16::new(value) {
            Some(nz) if value <= MAX_YEAR => Ok(Self(nz)),
            _ => Err(ParseError::InvalidYear(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this year has a February 29th
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        match NonZeroU8::new(value) {
            Some(nz) if value <= MAX_MONTH => Ok(Self(nz)),
            _ => Err(ParseError::InvalidMonth(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

/// A day of month, checked against the month length of its year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day valid for the given year and month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
        };

        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > days_in_month(year.get(), month.get()) {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

/// 1-based ordinal day within a year, at most 365 or 366 depending on the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:03}", _0)]
pub struct DayOfYear(NonZeroU16);

impl DayOfYear {
    /// Creates a day-of-year valid for `year`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDayOfYear` if the value is 0 or larger than
    /// the number of days in `year`.
    pub fn new(value: u16, year: u16) -> Result<Self, ParseError> {
        match NonZeroU16::new(value) {
            Some(nz) if value <= days_in_year(year) => Ok(Self(nz)),
            _ => Err(ParseError::InvalidDayOfYear { year, day: value }),
        }
    }

    /// Day `offset + 1`, for callers that derived `offset` from a valid date.
    pub(crate) const fn from_offset(offset: u16) -> Self {
        Self(NonZeroU16::MIN.saturating_add(offset))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl From<DayOfYear> for u16 {
    fn from(doy: DayOfYear) -> Self {
        doy.get()
    }
}

// Helper functions

/// Gregorian leap rule, shared by every conversion and validation path.
pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn days_in_year(year: u16) -> u16 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: u16, month: u8) -> (Year, Month) {
        (Year::new(year).unwrap(), Month::new(month).unwrap())
    }

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(
            Year::new(10000),
            Err(ParseError::InvalidYear(10000))
        ));
    }

    #[test]
    fn test_year_conversions() {
        let year: Year = 2024.try_into().unwrap();
        assert_eq!(year.get(), 2024);
        assert_eq!(u16::from(year), 2024);
        assert_eq!(year.to_string(), "2024");
        assert!(year.is_leap());
        assert!(!Year::new(2023).unwrap().is_leap());
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
        let result: Result<Month, _> = 255.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_day_respects_month_length() {
        let (y, m) = ym(2024, 1);
        assert!(Day::new(31, y, m).is_ok());
        assert!(Day::new(32, y, m).is_err());

        let (y, m) = ym(2023, 2);
        assert!(Day::new(28, y, m).is_ok());
        assert!(matches!(
            Day::new(29, y, m),
            Err(ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        ));

        let (y, m) = ym(2024, 2);
        assert!(Day::new(29, y, m).is_ok());

        let (y, m) = ym(2024, 4);
        assert!(Day::new(31, y, m).is_err());
        assert!(Day::new(0, y, m).is_err());
    }

    #[test]
    fn test_day_of_year_bounds() {
        assert_eq!(DayOfYear::new(1, 2023).unwrap().get(), 1);
        assert_eq!(DayOfYear::new(365, 2023).unwrap().get(), 365);
        assert!(DayOfYear::new(366, 2023).is_err());
        assert_eq!(DayOfYear::new(366, 2024).unwrap().get(), 366);
        assert!(matches!(
            DayOfYear::new(0, 2024),
            Err(ParseError::InvalidDayOfYear { year: 2024, day: 0 })
        ));
    }

    #[test]
    fn test_day_of_year_display_is_padded() {
        assert_eq!(DayOfYear::new(7, 2024).unwrap().to_string(), "007");
        assert_eq!(DayOfYear::new(366, 2024).unwrap().to_string(), "366");
    }

    #[test]
    fn test_is_leap_year_cases() {
        let cases = [
            (2020, true, "divisible by 4"),
            (2024, true, "divisible by 4"),
            (2023, false, "not divisible by 4"),
            (1900, false, "century not divisible by 400"),
            (2100, false, "century not divisible by 400"),
            (2000, true, "divisible by 400"),
            (2400, true, "divisible by 400"),
        ];

        for (year, expected, description) in cases {
            assert_eq!(
                is_leap_year(year),
                expected,
                "Year {year} ({description}): expected leap = {expected}"
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28, "Century year not divisible by 400");
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12u8 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2000), 366);
    }
}
