//! Per-day occurrence counts over a date range, for calendar views.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::days_inclusive;
use crate::matcher::matches;
use crate::model::{DaySummary, Task, TaskCompletion, TaskException};

/// ## Summary
/// Counts occurrences and completed occurrences for each date of `[start, end]`.
///
/// Gives the same totals as calling `instances_for_date` once per day and
/// counting, without building titles or times. Dates with no occurrences are
/// left out of the map; `start > end` yields an empty map.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn summarize(
    one_off: &[Task],
    recurring: &[Task],
    exceptions: &[TaskException],
    completions: &[TaskCompletion],
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<NaiveDate, DaySummary> {
    let mut one_off_by_date: HashMap<NaiveDate, Vec<&Task>> = HashMap::new();
    for task in one_off {
        one_off_by_date.entry(task.anchor_date).or_default().push(task);
    }

    let skipped: HashSet<(Uuid, NaiveDate)> = exceptions
        .iter()
        .filter(|e| e.is_skip())
        .map(|e| (e.task_id, e.date))
        .collect();

    let completed: HashSet<(Uuid, NaiveDate)> = completions
        .iter()
        .filter(|c| c.completed)
        .map(|c| (c.task_id, c.date))
        .collect();

    let rules: Vec<_> = recurring
        .iter()
        .filter_map(|task| task.recurrence.as_ref().map(|rule| (task, rule)))
        .collect();

    let mut summaries = BTreeMap::new();
    for day in days_inclusive(start, end) {
        let mut summary = DaySummary::default();

        for task in one_off_by_date.get(&day).into_iter().flatten() {
            summary.total += 1;
            if task.completed {
                summary.completed += 1;
            }
        }

        for (task, rule) in &rules {
            if !matches(rule, task.anchor_date, day) {
                continue;
            }
            let key = (task.id, day);
            if skipped.contains(&key) {
                continue;
            }
            summary.total += 1;
            if completed.contains(&key) {
                summary.completed += 1;
            }
        }

        if summary.total > 0 {
            summaries.insert(day, summary);
        }
    }

    tracing::debug!(%start, %end, days = summaries.len(), "Summarized task range");
    summaries
}
