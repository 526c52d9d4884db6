//! Storage boundary: the repository trait the service reads and writes through.

use std::future::Future;

use chrono::NaiveDate;
use getitdone_recurrence::model::{Task, TaskCompletion, TaskException};
use uuid::Uuid;

use crate::error::ServiceResult;

pub mod memory;
pub mod record;

pub use memory::InMemoryTaskRepository;

/// Task, exception and completion storage.
///
/// Exceptions and completions are unique per `(task_id, date)`; the upsert
/// methods replace an existing row for the same key.
pub trait TaskRepository: Send + Sync {
    /// One-off tasks of `user` due on `date`, in creation order.
    fn tasks_on_date(
        &self,
        user: &str,
        date: NaiveDate,
    ) -> impl Future<Output = ServiceResult<Vec<Task>>> + Send;

    /// One-off tasks of `user` due in `[start, end]`, ordered by date then creation.
    fn tasks_in_range(
        &self,
        user: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = ServiceResult<Vec<Task>>> + Send;

    /// Every task of `user` carrying a recurrence rule.
    fn recurring_tasks(&self, user: &str) -> impl Future<Output = ServiceResult<Vec<Task>>> + Send;

    fn task_by_id(&self, id: Uuid) -> impl Future<Output = ServiceResult<Option<Task>>> + Send;

    fn insert_task(&self, task: Task) -> impl Future<Output = ServiceResult<Task>> + Send;

    /// Applies `apply` to the stored task while holding it, and returns the
    /// result. Fields `apply` leaves alone keep their latest stored value.
    fn update_task<F>(
        &self,
        id: Uuid,
        apply: F,
    ) -> impl Future<Output = ServiceResult<Task>> + Send
    where
        F: FnOnce(&mut Task) + Send;

    /// Deletes a task together with its exceptions and completions.
    fn delete_task(&self, id: Uuid) -> impl Future<Output = ServiceResult<()>> + Send;

    fn exceptions_for_tasks(
        &self,
        task_ids: &[Uuid],
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = ServiceResult<Vec<TaskException>>> + Send;

    fn upsert_exception(
        &self,
        exception: TaskException,
    ) -> impl Future<Output = ServiceResult<TaskException>> + Send;

    fn delete_exception(
        &self,
        task_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = ServiceResult<()>> + Send;

    fn completions_for_tasks(
        &self,
        task_ids: &[Uuid],
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = ServiceResult<Vec<TaskCompletion>>> + Send;

    fn upsert_completion(
        &self,
        completion: TaskCompletion,
    ) -> impl Future<Output = ServiceResult<TaskCompletion>> + Send;

    fn delete_completion(
        &self,
        task_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = ServiceResult<()>> + Send;
}
