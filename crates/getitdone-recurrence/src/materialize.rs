//! Per-date materialization of task occurrences.

use chrono::NaiveDate;

use crate::describe::describe;
use crate::matcher::matches;
use crate::merge::effective_fields;
use crate::model::{Task, TaskCompletion, TaskException, TaskInstance};

/// ## Summary
/// Computes every task occurrence due on `date`.
///
/// One-off tasks anchored on `date` come first, copied verbatim. Recurring
/// tasks follow, in input order, when their rule matches `date` and no `skip`
/// exception covers it; a `modify` exception overrides the fields it sets and
/// the completion row for `(task, date)` decides `completed`.
///
/// Tasks in `recurring` without a rule are ignored.
///
/// ## Side Effects
/// None - pure function.
#[must_use]
pub fn instances_for_date(
    one_off: &[Task],
    recurring: &[Task],
    exceptions: &[TaskException],
    completions: &[TaskCompletion],
    date: NaiveDate,
) -> Vec<TaskInstance> {
    let mut instances: Vec<TaskInstance> = one_off
        .iter()
        .filter(|task| task.anchor_date == date)
        .map(one_off_instance)
        .collect();

    for task in recurring {
        let Some(rule) = &task.recurrence else {
            continue;
        };
        if !matches(rule, task.anchor_date, date) {
            continue;
        }

        let exception = exceptions
            .iter()
            .find(|e| e.task_id == task.id && e.date == date);
        if exception.is_some_and(TaskException::is_skip) {
            continue;
        }

        let completion = completions
            .iter()
            .find(|c| c.task_id == task.id && c.date == date);
        let fields = effective_fields(task, exception.and_then(TaskException::overrides));
        let completed = completion.is_some_and(|c| c.completed);

        instances.push(TaskInstance {
            task_id: task.id,
            user_slug: task.user_slug.clone(),
            instance_date: date,
            title: fields.title,
            notes: fields.notes,
            time: fields.time,
            completed,
            completed_at: completion
                .filter(|c| c.completed)
                .and_then(|c| c.completed_at),
            is_recurring: true,
            is_exception: exception.is_some(),
            reminder: fields.reminder,
            repeats: Some(describe(rule)).filter(|text| !text.is_empty()),
        });
    }

    tracing::debug!(%date, count = instances.len(), "Materialized task instances");
    instances
}

fn one_off_instance(task: &Task) -> TaskInstance {
    TaskInstance {
        task_id: task.id,
        user_slug: task.user_slug.clone(),
        instance_date: task.anchor_date,
        title: task.title.clone(),
        notes: task.notes.clone(),
        time: task.time,
        completed: task.completed,
        completed_at: task.completed_at,
        is_recurring: false,
        is_exception: false,
        reminder: task.reminder,
        repeats: None,
    }
}
