//! UTC day arithmetic on the proleptic Gregorian calendar.
//!
//! Dates are mapped to a count of days since 1970-01-01 using Howard
//! Hinnant's `days_from_civil` / `civil_from_days` algorithms, so ordinal
//! and offset computations never involve a time of day or a timezone.

use std::time::{SystemTime, UNIX_EPOCH};

/// Days from 0000-03-01 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;
/// Days in a 400-year Gregorian era
const DAYS_PER_ERA: i64 = 146_097;
const SECONDS_PER_DAY: u64 = 86_400;

/// Converts a civil date to days since the Unix epoch.
pub const fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let year = year as i64;
    let month = month as i64;
    let day = day as i64;

    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400; // [0, 399]
    let mp = if month > 2 { month - 3 } else { month + 9 }; // March = 0
    let doy = (153 * mp + 2) / 5 + day - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * DAYS_PER_ERA + doe - UNIX_EPOCH_DAYS
}

/// Converts days since the Unix epoch back to a civil `(year, month, day)`.
///
/// The year is returned as `i64`; callers validate it against their own range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month as u8, day as u8)
}

/// Current UTC date as days since the Unix epoch.
///
/// A clock set before 1970 reads as the epoch itself.
pub fn today_epoch_days() -> i64 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    i64::try_from(secs / SECONDS_PER_DAY).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_day_zero() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(days_from_civil(2000, 1, 1), 10_957);
        assert_eq!(days_from_civil(2024, 1, 15), 19_737);
        assert_eq!(days_from_civil(1900, 1, 1), -25_567);
        assert_eq!(civil_from_days(19_737), (2024, 1, 15));
        assert_eq!(civil_from_days(-25_567), (1900, 1, 1));
    }

    #[test]
    fn test_leap_day_boundaries() {
        let feb_28 = days_from_civil(2024, 2, 28);
        assert_eq!(civil_from_days(feb_28 + 1), (2024, 2, 29));
        assert_eq!(civil_from_days(feb_28 + 2), (2024, 3, 1));

        let feb_28_1900 = days_from_civil(1900, 2, 28);
        assert_eq!(civil_from_days(feb_28_1900 + 1), (1900, 3, 1));
    }

    #[test]
    fn test_year_lengths_from_day_counts() {
        assert_eq!(days_from_civil(2025, 1, 1) - days_from_civil(2024, 1, 1), 366);
        assert_eq!(days_from_civil(2024, 1, 1) - days_from_civil(2023, 1, 1), 365);
        assert_eq!(days_from_civil(2001, 1, 1) - days_from_civil(2000, 1, 1), 366);
        assert_eq!(days_from_civil(1901, 1, 1) - days_from_civil(1900, 1, 1), 365);
    }

    #[test]
    fn test_today_is_after_2020() {
        assert!(today_epoch_days() > days_from_civil(2020, 1, 1));
    }
}
