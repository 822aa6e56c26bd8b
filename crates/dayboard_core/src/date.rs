//! Calendar date keys.
//!
//! A date key is the `YYYY-MM-DD` spelling of a local calendar day. Keys are
//! built from and parsed into year/month/day components of a [`NaiveDate`],
//! so no timezone ever takes part in the conversion.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::DateKeyError;

/// Formats a calendar date as its `YYYY-MM-DD` key.
pub fn to_date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses a `YYYY-MM-DD` key back into the calendar date it names.
///
/// Only the canonical zero-padded spelling is accepted, which keeps
/// `to_date_key(from_date_key(k)?) == k` for every key that parses.
pub fn from_date_key(key: &str) -> Result<NaiveDate, DateKeyError> {
    let malformed = || DateKeyError::Malformed(key.to_string());

    let mut parts = key.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let is_digits = |part: &str, len: usize| {
        part.len() == len && part.chars().all(|c| c.is_ascii_digit())
    };
    if !is_digits(year, 4) || !is_digits(month, 2) || !is_digits(day, 2) {
        return Err(malformed());
    }

    let year: i32 = year.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let day: u32 = day.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateKeyError::OutOfRange(key.to_string()))
}

/// Weekday index of a date, 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Weekday index of the day named by `key`.
pub fn weekday_of(key: &str) -> Result<u8, DateKeyError> {
    from_date_key(key).map(weekday_index)
}

/// The current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
