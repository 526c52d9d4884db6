use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

/// Field overrides a `modify` exception applies to one occurrence.
///
/// `None` means "inherit from the base task".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceOverride {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub time: Option<NaiveTime>,
    pub reminder_enabled: Option<bool>,
    pub reminder_offset_minutes: Option<u32>,
}

impl OccurrenceOverride {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionKind {
    /// The occurrence does not happen.
    Skip,
    /// The occurrence happens with some fields replaced.
    Modify(OccurrenceOverride),
}

/// Per-date exception to a recurring task. Unique per `(task_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskException {
    pub task_id: Uuid,
    pub date: NaiveDate,
    pub kind: ExceptionKind,
}

impl TaskException {
    #[must_use]
    pub const fn skip(task_id: Uuid, date: NaiveDate) -> Self {
        Self {
            task_id,
            date,
            kind: ExceptionKind::Skip,
        }
    }

    #[must_use]
    pub const fn modify(task_id: Uuid, date: NaiveDate, overrides: OccurrenceOverride) -> Self {
        Self {
            task_id,
            date,
            kind: ExceptionKind::Modify(overrides),
        }
    }

    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self.kind, ExceptionKind::Skip)
    }

    #[must_use]
    pub const fn overrides(&self) -> Option<&OccurrenceOverride> {
        match &self.kind {
            ExceptionKind::Modify(overrides) => Some(overrides),
            ExceptionKind::Skip => None,
        }
    }
}
