//! Decides whether a recurring task falls on a given date.

use chrono::{Datelike, NaiveDate};

use crate::calendar;
use crate::model::{Frequency, RecurrenceRule, WeekdaySet};

/// ## Summary
/// Returns `true` when a task anchored on `anchor` with `rule` has an
/// occurrence on `target`.
///
/// Dates before the anchor or after the rule's end date never match. The
/// anchor itself always matches otherwise. An unrecognized frequency matches
/// nothing else.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn matches(rule: &RecurrenceRule, anchor: NaiveDate, target: NaiveDate) -> bool {
    if target < anchor {
        return false;
    }
    if rule.end_date.is_some_and(|end| target > end) {
        return false;
    }
    if target == anchor {
        return true;
    }

    let interval = i64::from(rule.interval.get());
    let days = calendar::days_between(anchor, target);

    match &rule.frequency {
        Frequency::Daily | Frequency::Custom => days % interval == 0,
        Frequency::Weekly { days: Some(set) } if !set.is_empty() => {
            matches_weekdays(*set, interval, days, target)
        }
        Frequency::Weekly { .. } => {
            target.weekday() == anchor.weekday() && days % (7 * interval) == 0
        }
        Frequency::Monthly => matches_monthly(interval, anchor, target),
        Frequency::Unrecognized(tag) => {
            tracing::trace!(%tag, %anchor, %target, "Unrecognized frequency never matches");
            false
        }
    }
}

/// Weeks are counted from the anchor date, not from calendar week boundaries,
/// so with interval 2 the "on" weeks are days 0-6, 14-20, ... after the anchor.
fn matches_weekdays(set: WeekdaySet, interval: i64, days: i64, target: NaiveDate) -> bool {
    if !set.contains(target.weekday()) {
        return false;
    }
    interval == 1 || (days / 7) % interval == 0
}

fn matches_monthly(interval: i64, anchor: NaiveDate, target: NaiveDate) -> bool {
    let months = calendar::months_between(anchor, target);
    if months < 0 || months % interval != 0 {
        return false;
    }
    let effective_day = anchor.day().min(calendar::last_day_of_month(target));
    target.day() == effective_day
}
