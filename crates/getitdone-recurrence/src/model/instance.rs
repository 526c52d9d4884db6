use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::task::Reminder;

/// Effective view of one occurrence on one date. Computed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskInstance {
    pub task_id: Uuid,
    pub user_slug: String,
    pub instance_date: NaiveDate,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "super::time::hhmm", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub is_recurring: bool,
    /// Set when a `modify` exception shaped this occurrence.
    pub is_exception: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    /// Rule summary such as "Repeats every week on Mon". Recurring only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeats: Option<String>,
}

/// Occurrence counts for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub total: u32,
    pub completed: u32,
}
