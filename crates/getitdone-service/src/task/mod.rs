//! Task operations behind the day view, the month calendar and task editing.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use getitdone_core::validate;
use getitdone_recurrence::calendar::month_bounds;
use getitdone_recurrence::model::{
    DaySummary, ExceptionKind, Task, TaskCompletion, TaskException, TaskInstance,
};
use getitdone_recurrence::slot::{SlotGroups, group_by_slot};
use getitdone_recurrence::{instances_for_date, summarize};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::store::TaskRepository;

mod input;

pub use input::{NewTask, RuleInput, TaskPatch};

/// Which part of a task a delete request removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    /// Only the occurrence on this date. Applies to recurring tasks.
    ThisOccurrence(NaiveDate),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A skip exception now hides the occurrence.
    Skipped,
    /// The task and everything attached to it is gone.
    Deleted,
}

/// Everything due on one date, flat and grouped by time slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub tasks: Vec<TaskInstance>,
    pub slots: SlotGroups,
}

impl DayView {
    #[must_use]
    pub fn new(date: NaiveDate, tasks: Vec<TaskInstance>) -> Self {
        let slots = group_by_slot(tasks.clone());
        Self { date, tasks, slots }
    }
}

/// Task operations over a repository.
#[derive(Debug)]
pub struct TaskService<R> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    #[must_use]
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    async fn require_task(&self, id: Uuid) -> ServiceResult<Task> {
        self.repo
            .task_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// ## Summary
    /// Materializes every occurrence due on `date` for `user`.
    ///
    /// ## Errors
    /// Propagates repository errors.
    #[tracing::instrument(skip(self))]
    pub async fn day_view(&self, user: &str, date: NaiveDate) -> ServiceResult<DayView> {
        let one_off = self.repo.tasks_on_date(user, date).await?;
        let recurring = self.repo.recurring_tasks(user).await?;
        let ids: Vec<Uuid> = recurring.iter().map(|task| task.id).collect();
        let exceptions = self.repo.exceptions_for_tasks(&ids, date, date).await?;
        let completions = self.repo.completions_for_tasks(&ids, date, date).await?;

        let instances = instances_for_date(&one_off, &recurring, &exceptions, &completions, date);
        Ok(DayView::new(date, instances))
    }

    /// ## Summary
    /// Counts occurrences per day of `[start, end]`.
    ///
    /// ## Errors
    /// Propagates repository errors.
    #[tracing::instrument(skip(self))]
    pub async fn range_summary(
        &self,
        user: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<BTreeMap<NaiveDate, DaySummary>> {
        if start > end {
            return Ok(BTreeMap::new());
        }
        let one_off = self.repo.tasks_in_range(user, start, end).await?;
        let recurring = self.repo.recurring_tasks(user).await?;
        let ids: Vec<Uuid> = recurring.iter().map(|task| task.id).collect();
        let exceptions = self.repo.exceptions_for_tasks(&ids, start, end).await?;
        let completions = self.repo.completions_for_tasks(&ids, start, end).await?;

        Ok(summarize(
            &one_off,
            &recurring,
            &exceptions,
            &completions,
            start,
            end,
        ))
    }

    /// ## Summary
    /// Counts occurrences per day of a calendar month (`month` is 1-based).
    ///
    /// ## Errors
    /// Returns `ServiceError::ValidationError` for a month outside `1..=12`,
    /// and propagates repository errors.
    pub async fn month_summary(
        &self,
        user: &str,
        year: i32,
        month: u32,
    ) -> ServiceResult<BTreeMap<NaiveDate, DaySummary>> {
        let (start, end) = month_bounds(year, month).ok_or_else(|| {
            ServiceError::ValidationError(format!("invalid month {year}-{month}"))
        })?;
        self.range_summary(user, start, end).await
    }

    /// ## Summary
    /// Validates and stores a new task under a fresh id.
    ///
    /// ## Errors
    /// Returns a validation error for a bad title, notes or recurrence, and
    /// propagates repository errors.
    #[tracing::instrument(skip(self, new), fields(user = %new.user_slug, date = %new.date))]
    pub async fn create_task(&self, new: NewTask) -> ServiceResult<Task> {
        let mut task = Task::new(new.user_slug, validate::title(&new.title)?, new.date);
        task.notes = validate::notes(new.notes.as_deref())?;
        task.time = new.time;
        task.recurrence = new.recurrence.map(RuleInput::into_rule).transpose()?;
        task.reminder = new.reminder;

        let task = self.repo.insert_task(task).await?;
        tracing::info!(task_id = %task.id, recurring = task.is_recurring(), "Task created");
        Ok(task)
    }

    /// ## Summary
    /// Applies a partial update to a task.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id, a validation error
    /// for a bad field, and propagates repository errors.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_task(&self, id: Uuid, patch: TaskPatch) -> ServiceResult<Task> {
        if patch.is_empty() {
            return self.require_task(id).await;
        }

        let title = patch.title.as_deref().map(validate::title).transpose()?;
        let notes = patch
            .notes
            .map(|notes| validate::notes(notes.as_deref()))
            .transpose()?;
        let recurrence = patch
            .recurrence
            .map(|rule| rule.map(RuleInput::into_rule).transpose())
            .transpose()?;
        let (date, time, reminder) = (patch.date, patch.time, patch.reminder);

        let task = self
            .repo
            .update_task(id, move |task| {
                if let Some(title) = title {
                    task.title = title;
                }
                if let Some(notes) = notes {
                    task.notes = notes;
                }
                if let Some(date) = date {
                    task.anchor_date = date;
                }
                if let Some(time) = time {
                    task.time = time;
                }
                if let Some(recurrence) = recurrence {
                    task.recurrence = recurrence;
                }
                if let Some(reminder) = reminder {
                    task.reminder = reminder;
                }
            })
            .await?;
        tracing::info!(task_id = %task.id, "Task updated");
        Ok(task)
    }

    /// ## Summary
    /// Marks a task, or one occurrence of a recurring task, done or open.
    ///
    /// Recurring tasks complete per date: marking done upserts the completion
    /// row for `(task, date)` and reopening deletes it, so repeating either
    /// call changes nothing. One-off tasks carry the flag themselves and
    /// ignore `date`.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id and
    /// `ServiceError::ValidationError` when a recurring task gets no date.
    #[tracing::instrument(skip(self))]
    pub async fn set_completion(
        &self,
        id: Uuid,
        date: Option<NaiveDate>,
        completed: bool,
    ) -> ServiceResult<()> {
        let task = self.require_task(id).await?;

        if task.is_recurring() {
            let date = date.ok_or_else(|| {
                ServiceError::ValidationError(
                    "instance date is required for recurring tasks".to_string(),
                )
            })?;
            if completed {
                self.repo
                    .upsert_completion(TaskCompletion::done(id, date, Utc::now()))
                    .await?;
            } else {
                self.repo.delete_completion(id, date).await?;
            }
        } else {
            self.repo
                .update_task(id, move |task| {
                    if task.completed != completed {
                        task.completed = completed;
                        task.completed_at = completed.then(Utc::now);
                    }
                })
                .await?;
        }

        tracing::info!(task_id = %id, ?date, completed, "Completion updated");
        Ok(())
    }

    /// ## Summary
    /// Records a skip or modify exception for one occurrence of a recurring
    /// task, replacing any exception already stored for that date.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id and
    /// `ServiceError::ValidationError` for a one-off task or bad override fields.
    #[tracing::instrument(skip(self, kind))]
    pub async fn create_exception(
        &self,
        id: Uuid,
        date: NaiveDate,
        kind: ExceptionKind,
    ) -> ServiceResult<TaskException> {
        let task = self.require_task(id).await?;
        if !task.is_recurring() {
            return Err(ServiceError::ValidationError(
                "exceptions can only be created for recurring tasks".to_string(),
            ));
        }

        let exception = TaskException {
            task_id: id,
            date,
            kind: input::validate_exception(kind)?,
        };
        let exception = self.repo.upsert_exception(exception).await?;
        tracing::info!(task_id = %id, %date, skip = exception.is_skip(), "Exception stored");
        Ok(exception)
    }

    /// ## Summary
    /// Removes the exception of `(id, date)`, restoring the plain occurrence.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id.
    #[tracing::instrument(skip(self))]
    pub async fn delete_exception(&self, id: Uuid, date: NaiveDate) -> ServiceResult<()> {
        self.require_task(id).await?;
        self.repo.delete_exception(id, date).await
    }

    /// ## Summary
    /// Deletes one occurrence of a recurring task or the whole task.
    ///
    /// `ThisOccurrence` on a recurring task stores a skip exception; on a
    /// one-off task, and for `All`, the task is deleted together with its
    /// exceptions and completions.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: Uuid, scope: DeleteScope) -> ServiceResult<DeleteOutcome> {
        let task = self.require_task(id).await?;

        if let DeleteScope::ThisOccurrence(date) = scope
            && task.is_recurring()
        {
            self.repo
                .upsert_exception(TaskException::skip(id, date))
                .await?;
            tracing::info!(task_id = %id, %date, "Occurrence skipped");
            return Ok(DeleteOutcome::Skipped);
        }

        self.repo.delete_task(id).await?;
        tracing::info!(task_id = %id, "Task deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
