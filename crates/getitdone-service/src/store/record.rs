//! Row shapes as the storage layer keeps them, and their conversion into the
//! engine model.
//!
//! Rows are flat: a task's recurrence rule is spread over `recurrence_*`
//! columns and is absent when `recurrence_frequency` is null.

use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use getitdone_core::constants::DEFAULT_REMINDER_OFFSET_MINUTES;
use getitdone_recurrence::model::time::hhmm;
use getitdone_recurrence::model::{
    ExceptionKind, Frequency, OccurrenceOverride, RecurrenceRule, Reminder, Task, TaskCompletion,
    TaskException, WeekdaySet,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub user_slug: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recurrence_frequency: Option<String>,
    #[serde(default)]
    pub recurrence_interval: Option<i64>,
    #[serde(default)]
    pub recurrence_days_of_week: Option<Vec<i64>>,
    #[serde(default)]
    pub recurrence_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub reminder_enabled: Option<bool>,
    #[serde(default)]
    pub reminder_offset_minutes: Option<u32>,
}

impl TaskRecord {
    fn recurrence(&self) -> Option<RecurrenceRule> {
        let tag = self
            .recurrence_frequency
            .as_deref()
            .filter(|tag| !tag.is_empty())?;

        let days = self.recurrence_days_of_week.as_ref().map(|numbers| {
            WeekdaySet::from_numbers(numbers.iter().filter_map(|n| u8::try_from(*n).ok()))
        });

        let interval = match self.recurrence_interval {
            None => NonZeroU32::MIN,
            Some(raw) => u32::try_from(raw)
                .ok()
                .and_then(NonZeroU32::new)
                .unwrap_or_else(|| {
                    tracing::warn!(task_id = %self.id, interval = raw, "Invalid recurrence interval, using 1");
                    NonZeroU32::MIN
                }),
        };

        let frequency = Frequency::from_tag(tag, days);
        if let Frequency::Unrecognized(tag) = &frequency {
            tracing::warn!(task_id = %self.id, %tag, "Unrecognized recurrence frequency");
        }

        Some(RecurrenceRule {
            frequency,
            interval,
            end_date: self.recurrence_end_date,
        })
    }
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let recurrence = record.recurrence();
        let reminder = record.reminder_enabled.map(|enabled| Reminder {
            enabled,
            offset_minutes: record
                .reminder_offset_minutes
                .unwrap_or(DEFAULT_REMINDER_OFFSET_MINUTES),
        });
        Self {
            id: record.id,
            user_slug: record.user_slug,
            title: record.title,
            notes: record.notes.filter(|notes| !notes.is_empty()),
            anchor_date: record.date,
            time: record.time,
            completed: record.completed,
            completed_at: record.completed_at,
            recurrence,
            reminder,
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        let rule = task.recurrence.as_ref();
        Self {
            id: task.id,
            user_slug: task.user_slug.clone(),
            title: task.title.clone(),
            notes: task.notes.clone(),
            date: task.anchor_date,
            time: task.time,
            completed: task.completed,
            completed_at: task.completed_at,
            recurrence_frequency: rule.map(|r| r.frequency.tag().to_string()),
            recurrence_interval: rule.map(|r| i64::from(r.interval.get())),
            recurrence_days_of_week: rule
                .and_then(|r| r.frequency.weekdays())
                .map(|days| days.numbers().map(i64::from).collect()),
            recurrence_end_date: rule.and_then(|r| r.end_date),
            reminder_enabled: task.reminder.map(|r| r.enabled),
            reminder_offset_minutes: task.reminder.map(|r| r.offset_minutes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionType {
    Skip,
    Modify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub task_id: Uuid,
    pub exception_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ExceptionType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub reminder_enabled: Option<bool>,
    #[serde(default)]
    pub reminder_offset_minutes: Option<u32>,
}

impl From<ExceptionRecord> for TaskException {
    fn from(record: ExceptionRecord) -> Self {
        let kind = match record.kind {
            ExceptionType::Skip => ExceptionKind::Skip,
            ExceptionType::Modify => ExceptionKind::Modify(OccurrenceOverride {
                title: record.title.filter(|title| !title.is_empty()),
                notes: record.notes,
                time: record.time,
                reminder_enabled: record.reminder_enabled,
                reminder_offset_minutes: record.reminder_offset_minutes,
            }),
        };
        Self {
            task_id: record.task_id,
            date: record.exception_date,
            kind,
        }
    }
}

impl From<&TaskException> for ExceptionRecord {
    fn from(exception: &TaskException) -> Self {
        let overrides = exception.overrides().cloned().unwrap_or_default();
        Self {
            task_id: exception.task_id,
            exception_date: exception.date,
            kind: if exception.is_skip() {
                ExceptionType::Skip
            } else {
                ExceptionType::Modify
            },
            title: overrides.title,
            notes: overrides.notes,
            time: overrides.time,
            reminder_enabled: overrides.reminder_enabled,
            reminder_offset_minutes: overrides.reminder_offset_minutes,
        }
    }
}

const fn completed_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub task_id: Uuid,
    pub date: NaiveDate,
    #[serde(default = "completed_by_default")]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<CompletionRecord> for TaskCompletion {
    fn from(record: CompletionRecord) -> Self {
        Self {
            task_id: record.task_id,
            date: record.date,
            completed: record.completed,
            completed_at: record.completed_at,
        }
    }
}

impl From<&TaskCompletion> for CompletionRecord {
    fn from(completion: &TaskCompletion) -> Self {
        Self {
            task_id: completion.task_id,
            date: completion.date,
            completed: completion.completed,
            completed_at: completion.completed_at,
        }
    }
}

/// Every row of every table, as loaded from or written to a dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub exceptions: Vec<ExceptionRecord>,
    #[serde(default)]
    pub completions: Vec<CompletionRecord>,
}
