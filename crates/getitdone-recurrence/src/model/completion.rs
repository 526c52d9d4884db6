use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Completion record for one occurrence of a recurring task.
///
/// Unique per `(task_id, date)`. A missing record and `completed == false`
/// both mean the occurrence is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCompletion {
    pub task_id: Uuid,
    pub date: NaiveDate,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskCompletion {
    #[must_use]
    pub const fn done(task_id: Uuid, date: NaiveDate, completed_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            date,
            completed: true,
            completed_at: Some(completed_at),
        }
    }
}
