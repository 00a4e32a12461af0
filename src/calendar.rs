//! Calendar helpers for month scaling and lag labelling

use chrono::{Datelike, Days, Duration, Local, Month, NaiveDate};

use crate::{PowercastError, Result};

/// Gregorian leap-year test, applied proleptically.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return Err(PowercastError::InvalidMonth { month }),
    };
    Ok(days)
}

/// English month name, e.g. `January`.
pub fn month_name(month: u32) -> Result<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .ok_or(PowercastError::InvalidMonth { month })
}

/// The month before `(year, month)`, wrapping January into December of the prior year.
pub fn previous_month(year: i32, month: u32) -> Result<(i32, u32)> {
    match month {
        1 => year
            .checked_sub(1)
            .map(|prior| (prior, 12))
            .ok_or_else(|| PowercastError::validation(format!("year {year} has no previous year"))),
        2..=12 => Ok((year, month - 1)),
        _ => Err(PowercastError::InvalidMonth { month }),
    }
}

/// Dates whose usage feeds the daily model: one day and one week before `date`.
pub fn lag_dates(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let days_before = |n| {
        date.checked_sub_days(Days::new(n)).ok_or_else(|| {
            PowercastError::validation(format!("{date} is too early to look back {n} days"))
        })
    };
    Ok((days_before(1)?, days_before(7)?))
}

/// Default target of the daily form.
#[must_use]
pub fn tomorrow() -> NaiveDate {
    Local::now().date_naive() + Duration::days(1)
}

/// Day of week with Monday as 0.
#[must_use]
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}
