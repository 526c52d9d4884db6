//! Human-readable rule summaries.

use chrono::Weekday;

use crate::model::{Frequency, RecurrenceRule};

const fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

fn every(interval: u32, one: &str, many: &str) -> String {
    if interval == 1 {
        format!("Repeats every {one}")
    } else {
        format!("Repeats every {interval} {many}")
    }
}

/// ## Summary
/// Describes a rule, e.g. `"Repeats every 2 weeks on Mon, Wed"`.
///
/// Returns an empty string for a frequency this build does not recognize.
#[must_use]
pub fn describe(rule: &RecurrenceRule) -> String {
    let interval = rule.interval.get();
    let mut text = match &rule.frequency {
        Frequency::Daily | Frequency::Custom => every(interval, "day", "days"),
        Frequency::Weekly { days } => {
            let mut text = every(interval, "week", "weeks");
            if let Some(days) = days.filter(|d| !d.is_empty()) {
                let names: Vec<_> = days.iter().map(short_name).collect();
                text.push_str(" on ");
                text.push_str(&names.join(", "));
            }
            text
        }
        Frequency::Monthly => every(interval, "month", "months"),
        Frequency::Unrecognized(_) => return String::new(),
    };
    if let Some(end) = rule.end_date {
        text.push_str(&format!(" until {end}"));
    }
    text
}
