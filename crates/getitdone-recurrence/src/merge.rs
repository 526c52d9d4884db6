//! Base task → exception override merge.
//!
//! Order matters: the base task supplies every field, a `modify` exception
//! replaces the fields it sets, and completion is overlaid afterwards by the
//! caller because it is keyed separately.

use chrono::NaiveTime;
use getitdone_core::constants::DEFAULT_REMINDER_OFFSET_MINUTES;

use crate::model::{OccurrenceOverride, Reminder, Task};

/// Display fields of one occurrence after overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveFields {
    pub title: String,
    pub notes: Option<String>,
    pub time: Option<NaiveTime>,
    pub reminder: Option<Reminder>,
}

/// ## Summary
/// Resolves the fields of one occurrence from its base task and an optional override.
///
/// Each field falls back to the base task independently. A reminder override
/// applies only when it sets `reminder_enabled`; its offset then falls back to
/// the base reminder's offset, then to the default offset.
#[must_use]
pub fn effective_fields(task: &Task, overrides: Option<&OccurrenceOverride>) -> EffectiveFields {
    let Some(overrides) = overrides else {
        return EffectiveFields {
            title: task.title.clone(),
            notes: task.notes.clone(),
            time: task.time,
            reminder: task.reminder,
        };
    };

    let reminder = match overrides.reminder_enabled {
        Some(enabled) => Some(Reminder {
            enabled,
            offset_minutes: overrides
                .reminder_offset_minutes
                .or_else(|| task.reminder.map(|r| r.offset_minutes))
                .unwrap_or(DEFAULT_REMINDER_OFFSET_MINUTES),
        }),
        None => task.reminder,
    };

    EffectiveFields {
        title: overrides.title.clone().unwrap_or_else(|| task.title.clone()),
        notes: overrides.notes.clone().or_else(|| task.notes.clone()),
        time: overrides.time.or(task.time),
        reminder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, time};

    fn base() -> Task {
        Task::new("me", "Stretch", date("2026-01-01"))
            .with_notes("10 minutes")
            .with_time(time("07:00"))
            .with_reminder(Reminder::enabled(30))
    }

    #[test]
    fn test_no_override_copies_base() {
        let task = base();
        let fields = effective_fields(&task, None);
        assert_eq!(fields.title, "Stretch");
        assert_eq!(fields.notes.as_deref(), Some("10 minutes"));
        assert_eq!(fields.time, Some(time("07:00")));
        assert_eq!(fields.reminder, Some(Reminder::enabled(30)));
    }

    #[test]
    fn test_title_override_keeps_other_fields() {
        let task = base();
        let fields = effective_fields(&task, Some(&OccurrenceOverride::title("Long stretch")));
        assert_eq!(fields.title, "Long stretch");
        assert_eq!(fields.notes.as_deref(), Some("10 minutes"));
        assert_eq!(fields.time, Some(time("07:00")));
        assert_eq!(fields.reminder, Some(Reminder::enabled(30)));
    }

    #[test]
    fn test_time_and_notes_override() {
        let task = base();
        let overrides = OccurrenceOverride {
            notes: Some("skip the lunges".to_string()),
            time: Some(time("18:30")),
            ..OccurrenceOverride::default()
        };
        let fields = effective_fields(&task, Some(&overrides));
        assert_eq!(fields.title, "Stretch");
        assert_eq!(fields.notes.as_deref(), Some("skip the lunges"));
        assert_eq!(fields.time, Some(time("18:30")));
    }

    #[test]
    fn test_reminder_override_offset_fallbacks() {
        let task = base();
        let disable = OccurrenceOverride {
            reminder_enabled: Some(false),
            ..OccurrenceOverride::default()
        };
        assert_eq!(
            effective_fields(&task, Some(&disable)).reminder,
            Some(Reminder {
                enabled: false,
                offset_minutes: 30
            })
        );

        let no_base_reminder = Task {
            reminder: None,
            ..base()
        };
        let enable = OccurrenceOverride {
            reminder_enabled: Some(true),
            ..OccurrenceOverride::default()
        };
        assert_eq!(
            effective_fields(&no_base_reminder, Some(&enable)).reminder,
            Some(Reminder::enabled(DEFAULT_REMINDER_OFFSET_MINUTES))
        );

        let offset_only = OccurrenceOverride {
            reminder_offset_minutes: Some(60),
            ..OccurrenceOverride::default()
        };
        assert_eq!(
            effective_fields(&task, Some(&offset_only)).reminder,
            Some(Reminder::enabled(30))
        );
    }
}
