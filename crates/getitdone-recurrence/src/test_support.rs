//! Fixtures shared by the unit tests of this crate.

use chrono::{NaiveDate, NaiveTime};

use crate::model::{RecurrenceRule, Task};

pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("valid ISO date")
}

pub fn time(hhmm: &str) -> NaiveTime {
    NaiveTime::parse_from_str(hhmm, "%H:%M").expect("valid HH:MM time")
}

pub fn one_off(title: &str, on: &str) -> Task {
    Task::new("me", title, date(on))
}

pub fn recurring(title: &str, anchor: &str, rule: RecurrenceRule) -> Task {
    Task::new("me", title, date(anchor)).with_recurrence(rule)
}
