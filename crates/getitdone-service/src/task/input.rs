//! Caller-supplied task fields, validated before they reach the model.

use std::num::NonZeroU32;

use chrono::{NaiveDate, NaiveTime};
use getitdone_core::validate;
use getitdone_recurrence::model::{
    ExceptionKind, Frequency, OccurrenceOverride, RecurrenceRule, Reminder, WeekdaySet,
};

use crate::error::{ServiceError, ServiceResult};

/// Recurrence as a client sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleInput {
    /// `daily`, `weekly`, `monthly` or `custom`.
    pub frequency: String,
    pub interval: Option<i64>,
    /// Day numbers, `0 = Sunday`. Read for `weekly` only.
    pub days_of_week: Option<Vec<u8>>,
    pub end_date: Option<NaiveDate>,
}

impl RuleInput {
    #[must_use]
    pub fn new(frequency: impl Into<String>) -> Self {
        Self {
            frequency: frequency.into(),
            ..Self::default()
        }
    }

    /// ## Summary
    /// Validates the input and builds a rule from it.
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` for an unknown frequency or an
    /// interval below one, and `CoreError::InvalidInput` for a weekday number
    /// outside `0..=6` on a weekly rule.
    pub fn into_rule(self) -> ServiceResult<RecurrenceRule> {
        let days = match &self.days_of_week {
            Some(numbers) if self.frequency == "weekly" => {
                validate::weekday_numbers(numbers)?;
                Some(WeekdaySet::from_numbers(numbers.iter().copied()))
            }
            _ => None,
        };

        let frequency = Frequency::from_tag(&self.frequency, days);
        if let Frequency::Unrecognized(tag) = &frequency {
            return Err(ServiceError::ValidationError(format!(
                "unknown recurrence frequency '{tag}'"
            )));
        }

        let interval = match self.interval {
            None => NonZeroU32::MIN,
            Some(raw) => u32::try_from(raw)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or_else(|| {
                    ServiceError::ValidationError(format!(
                        "recurrence interval must be at least 1, got {raw}"
                    ))
                })?,
        };

        Ok(RecurrenceRule {
            frequency,
            interval,
            end_date: self.end_date,
        })
    }
}

/// Fields of a task to create.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_slug: String,
    pub title: String,
    pub notes: Option<String>,
    /// Due date, or first occurrence when `recurrence` is set.
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub recurrence: Option<RuleInput>,
    pub reminder: Option<Reminder>,
}

impl NewTask {
    #[must_use]
    pub fn new(user_slug: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_slug: user_slug.into(),
            title: title.into(),
            notes: None,
            date,
            time: None,
            recurrence: None,
            reminder: None,
        }
    }

    #[must_use]
    pub fn with_recurrence(mut self, rule: RuleInput) -> Self {
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
}

/// Partial update of a task. Outer `None` leaves a field untouched; for
/// nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub time: Option<Option<NaiveTime>>,
    pub recurrence: Option<Option<RuleInput>>,
    pub reminder: Option<Option<Reminder>>,
}

impl TaskPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.recurrence.is_none()
            && self.reminder.is_none()
    }
}

/// ## Summary
/// Trims and validates the override fields of a `modify` exception.
///
/// Present but blank notes become an empty string, so the occurrence shows
/// no notes instead of inheriting the task's.
///
/// ## Errors
/// Returns a validation error for a blank or over-long title or over-long notes.
pub(crate) fn validate_exception(kind: ExceptionKind) -> ServiceResult<ExceptionKind> {
    let ExceptionKind::Modify(overrides) = kind else {
        return Ok(ExceptionKind::Skip);
    };
    let title = overrides.title.as_deref().map(validate::title).transpose()?;
    // Blank notes clear the occurrence's notes; `None` inherits the task's.
    let notes = match overrides.notes.as_deref() {
        Some(raw) if raw.trim().is_empty() => Some(String::new()),
        Some(raw) => validate::notes(Some(raw))?,
        None => None,
    };
    Ok(ExceptionKind::Modify(OccurrenceOverride {
        title,
        notes,
        ..overrides
    }))
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use getitdone_core::error::CoreError;

    use super::*;

    #[test]
    fn test_rule_defaults_interval_to_one() {
        let rule = RuleInput::new("daily").into_rule().expect("valid");
        assert_eq!(rule, RecurrenceRule::daily());
    }

    #[test]
    fn test_weekly_rule_reads_days() {
        let rule = RuleInput {
            frequency: "weekly".to_string(),
            interval: Some(2),
            days_of_week: Some(vec![1, 3]),
            end_date: None,
        }
        .into_rule()
        .expect("valid");
        assert_eq!(rule, RecurrenceRule::weekly_on([Weekday::Mon, Weekday::Wed]).every(2));
    }

    #[test]
    fn test_days_ignored_outside_weekly() {
        let rule = RuleInput {
            days_of_week: Some(vec![9]),
            ..RuleInput::new("monthly")
        }
        .into_rule()
        .expect("valid");
        assert_eq!(rule.frequency, Frequency::Monthly);
    }

    #[test_log::test]
    fn test_rule_rejections() {
        assert!(matches!(
            RuleInput::new("yearly").into_rule(),
            Err(ServiceError::ValidationError(_))
        ));
        assert!(matches!(
            RuleInput {
                interval: Some(0),
                ..RuleInput::new("daily")
            }
            .into_rule(),
            Err(ServiceError::ValidationError(_))
        ));
        assert!(matches!(
            RuleInput {
                days_of_week: Some(vec![1, 7]),
                ..RuleInput::new("weekly")
            }
            .into_rule(),
            Err(ServiceError::CoreError(CoreError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_exception_overrides_are_trimmed() {
        let kind = validate_exception(ExceptionKind::Modify(OccurrenceOverride {
            title: Some("  Long run ".to_string()),
            notes: Some("   ".to_string()),
            ..OccurrenceOverride::default()
        }))
        .expect("valid");
        let ExceptionKind::Modify(overrides) = kind else {
            panic!("expected modify");
        };
        assert_eq!(overrides.title.as_deref(), Some("Long run"));
        assert_eq!(overrides.notes.as_deref(), Some(""));

        assert!(validate_exception(ExceptionKind::Modify(OccurrenceOverride::title(" "))).is_err());
    }

    #[test]
    fn test_exception_notes_absent_inherit() {
        let kind = validate_exception(ExceptionKind::Modify(OccurrenceOverride::title("Jog")))
            .expect("valid");
        let ExceptionKind::Modify(overrides) = kind else {
            panic!("expected modify");
        };
        assert_eq!(overrides.notes, None);
    }
}
