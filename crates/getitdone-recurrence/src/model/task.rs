use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use getitdone_core::constants::DEFAULT_REMINDER_OFFSET_MINUTES;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rule::RecurrenceRule;

/// Reminder preference. Carried through to instances, never acted on here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub enabled: bool,
    pub offset_minutes: u32,
}

impl Reminder {
    #[must_use]
    pub const fn enabled(offset_minutes: u32) -> Self {
        Self {
            enabled: true,
            offset_minutes,
        }
    }
}

impl Default for Reminder {
    fn default() -> Self {
        Self {
            enabled: false,
            offset_minutes: DEFAULT_REMINDER_OFFSET_MINUTES,
        }
    }
}

/// A task as stored: either a one-off due on `anchor_date`, or a recurring
/// task whose occurrences are computed from `anchor_date` and `recurrence`.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub user_slug: String,
    pub title: String,
    pub notes: Option<String>,
    /// Due date of a one-off task; first occurrence of a recurring one.
    pub anchor_date: NaiveDate,
    pub time: Option<NaiveTime>,
    /// Only meaningful for one-off tasks. Recurring tasks complete per date.
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub recurrence: Option<RecurrenceRule>,
    pub reminder: Option<Reminder>,
}

impl Task {
    /// Creates an open one-off task with a fresh id.
    #[must_use]
    pub fn new(
        user_slug: impl Into<String>,
        title: impl Into<String>,
        anchor_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_slug: user_slug.into(),
            title: title.into(),
            notes: None,
            anchor_date,
            time: None,
            completed: false,
            completed_at: None,
            recurrence: None,
            reminder: None,
        }
    }

    #[must_use]
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_reminder(mut self, reminder: Reminder) -> Self {
        self.reminder = Some(reminder);
        self
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}
