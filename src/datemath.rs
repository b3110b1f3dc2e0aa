//! Calendar arithmetic on [`time::Date`] and the injectable source of "today"
use thiserror::Error;
use time::{error::IndeterminateOffset, Date, Duration, Month};
use time::{OffsetDateTime, UtcOffset, Weekday};

/// Returned when an operation would produce a date outside the range
/// supported by the `time` crate
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

pub trait WeekdayExt {
    /// Zero-based index of the weekday in a week that starts on Sunday
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

/// Move `date` by `days` days (negative values move backwards)
pub fn add_days(date: Date, days: i64) -> Result<Date, OutOfTimeError> {
    date.checked_add(Duration::days(days)).ok_or(OutOfTimeError)
}

/// Move `date` by `months` months.
///
/// The day of the month is clamped to the length of the target month, so
/// January 31 plus one month is the last day of February.
pub fn add_months(date: Date, months: i32) -> Result<Date, OutOfTimeError> {
    let index0 = i32::from(u8::from(date.month()) - 1)
        .checked_add(months)
        .ok_or(OutOfTimeError)?;
    let year = date
        .year()
        .checked_add(index0.div_euclid(12))
        .ok_or(OutOfTimeError)?;
    let month = u8::try_from(index0.rem_euclid(12) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(OutOfTimeError)?;
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).map_err(|_| OutOfTimeError)
}

/// Day of the week of `date`, 0 for Sunday through 6 for Saturday
pub fn day_of_week(date: Date) -> u8 {
    date.weekday().index0()
}

/// First day of the month containing `date`
pub fn first_of_month(date: Date) -> Result<Date, OutOfTimeError> {
    add_days(date, 1 - i64::from(date.day()))
}

/// True iff the two dates have the same year, month, and day
pub fn is_same_day(a: Date, b: Date) -> bool {
    (a.year(), a.month(), a.day()) == (b.year(), b.month(), b.day())
}

/// Source of the current date.  Every call reads the clock anew; callers
/// must not cache the result across validations.
pub trait Clock {
    fn today(&self) -> Date;
}

/// Reads the system clock, converting to a UTC offset captured at
/// construction time
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// Use the local time zone.  Determining the local offset can fail on
    /// some platforms once multiple threads are running, so this should be
    /// called early in `main()`.
    pub fn local() -> Result<SystemClock, IndeterminateOffset> {
        let offset = UtcOffset::current_local_offset()?;
        Ok(SystemClock { offset })
    }

    pub fn utc() -> SystemClock {
        SystemClock {
            offset: UtcOffset::UTC,
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}

/// A clock that is stuck on one day
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Date {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_add_days_across_year() {
        assert_eq!(add_days(date!(2024 - 12 - 30), 3), Ok(date!(2025 - 01 - 02)));
        assert_eq!(add_days(date!(2025 - 01 - 02), -3), Ok(date!(2024 - 12 - 30)));
        assert_eq!(add_days(date!(2024 - 02 - 28), 1), Ok(date!(2024 - 02 - 29)));
        assert_eq!(add_days(date!(2023 - 02 - 28), 1), Ok(date!(2023 - 03 - 01)));
    }

    #[test]
    fn test_add_days_end_of_time() {
        assert_eq!(add_days(Date::MAX, 1), Err(OutOfTimeError));
        assert_eq!(add_days(Date::MIN, -1), Err(OutOfTimeError));
        assert_eq!(add_days(Date::MAX, 0), Ok(Date::MAX));
    }

    #[test]
    fn test_add_months_rolls_year() {
        assert_eq!(add_months(date!(2025 - 12 - 15), 1), Ok(date!(2026 - 01 - 15)));
        assert_eq!(add_months(date!(2026 - 01 - 15), -1), Ok(date!(2025 - 12 - 15)));
        assert_eq!(add_months(date!(2026 - 03 - 01), -27), Ok(date!(2023 - 12 - 01)));
        assert_eq!(add_months(date!(2026 - 03 - 01), 24), Ok(date!(2028 - 03 - 01)));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date!(2025 - 01 - 31), 1), Ok(date!(2025 - 02 - 28)));
        assert_eq!(add_months(date!(2024 - 01 - 31), 1), Ok(date!(2024 - 02 - 29)));
        assert_eq!(add_months(date!(2024 - 03 - 31), -1), Ok(date!(2024 - 02 - 29)));
        assert_eq!(add_months(date!(2024 - 05 - 31), 1), Ok(date!(2024 - 06 - 30)));
    }

    #[test]
    fn test_add_months_end_of_time() {
        assert_eq!(add_months(date!(9999 - 12 - 01), 1), Err(OutOfTimeError));
        assert_eq!(add_months(Date::MIN, -1), Err(OutOfTimeError));
        assert_eq!(add_months(date!(2025 - 01 - 01), i32::MAX), Err(OutOfTimeError));
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(day_of_week(date!(2023 - 11 - 12)), 0);
        assert_eq!(day_of_week(date!(2023 - 11 - 16)), 4);
        assert_eq!(day_of_week(date!(2023 - 11 - 18)), 6);
        assert_eq!(day_of_week(date!(2026 - 10 - 01)), 4);
    }

    #[test]
    fn test_first_of_month() {
        assert_eq!(first_of_month(date!(2026 - 10 - 19)), Ok(date!(2026 - 10 - 01)));
        assert_eq!(first_of_month(date!(2026 - 10 - 01)), Ok(date!(2026 - 10 - 01)));
    }

    #[test]
    fn test_is_same_day() {
        assert!(
            is_same_day(date!(2026 - 10 - 19), date!(2026 - 10 - 19)),
            "identical dates should match"
        );
        assert!(
            !is_same_day(date!(2026 - 10 - 19), date!(2025 - 10 - 19)),
            "year should be compared"
        );
    }

    #[test]
    fn test_fixed_clock() {
        fn read<C: Clock>(clock: C) -> Date {
            clock.today()
        }

        let clock = FixedClock(date!(2026 - 10 - 19));
        assert_eq!(clock.today(), date!(2026 - 10 - 19));
        assert_eq!(read(&clock), date!(2026 - 10 - 19));
    }
}
