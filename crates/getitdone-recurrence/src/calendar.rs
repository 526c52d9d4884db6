//! Date-only calendar arithmetic.
//!
//! All helpers work on `NaiveDate` values and count calendar units, never
//! elapsed time, so no timezone or daylight-saving shift can move a result.

use chrono::{Datelike, NaiveDate};

/// ## Summary
/// Number of calendar days from `from` to `to` (negative when `to` is earlier).
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// ## Summary
/// Number of calendar months from `from` to `to`, ignoring the day of month.
///
/// `2026-01-31 -> 2026-02-01` is one month even though only a day passed.
#[must_use]
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// ## Summary
/// Last valid day number of the month containing `date` (28..=31).
#[must_use]
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// ## Summary
/// Iterates every date of `[start, end]`. Yields nothing when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// ## Summary
/// First and last date of a month. `month` is 1-based.
///
/// Returns `None` for a month outside `1..=12` or a year chrono cannot represent.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.with_day(last_day_of_month(first))?;
    Some((first, last))
}
