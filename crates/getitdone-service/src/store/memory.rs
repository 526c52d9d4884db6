//! In-process repository backed by a dataset loaded up front.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use getitdone_recurrence::model::{Task, TaskCompletion, TaskException};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TaskRepository;
use super::record::Dataset;
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Default)]
struct State {
    /// Insertion order, which is the creation order the day view shows.
    tasks: Vec<Task>,
    exceptions: BTreeMap<(Uuid, NaiveDate), TaskException>,
    completions: BTreeMap<(Uuid, NaiveDate), TaskCompletion>,
}

impl State {
    fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

/// `TaskRepository` held entirely in memory behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    state: RwLock<State>,
}

impl InMemoryTaskRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Builds a repository from dataset rows.
    ///
    /// ## Errors
    /// Returns `ServiceError::Conflict` if two task rows share an id, or
    /// two exception or completion rows share a `(task_id, date)` key.
    pub fn from_dataset(dataset: Dataset) -> ServiceResult<Self> {
        let mut state = State::default();

        let mut seen = HashSet::new();
        for record in dataset.tasks {
            if !seen.insert(record.id) {
                return Err(ServiceError::Conflict(format!(
                    "duplicate task id {}",
                    record.id
                )));
            }
            state.tasks.push(Task::from(record));
        }

        for record in dataset.exceptions {
            let exception = TaskException::from(record);
            let key = (exception.task_id, exception.date);
            if state.exceptions.insert(key, exception).is_some() {
                return Err(ServiceError::Conflict(format!(
                    "duplicate exception for task {} on {}",
                    key.0, key.1
                )));
            }
        }

        for record in dataset.completions {
            let completion = TaskCompletion::from(record);
            let key = (completion.task_id, completion.date);
            if state.completions.insert(key, completion).is_some() {
                return Err(ServiceError::Conflict(format!(
                    "duplicate completion for task {} on {}",
                    key.0, key.1
                )));
            }
        }

        tracing::debug!(
            tasks = state.tasks.len(),
            exceptions = state.exceptions.len(),
            completions = state.completions.len(),
            "Loaded dataset"
        );

        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

fn rows_for<T: Clone>(
    rows: &BTreeMap<(Uuid, NaiveDate), T>,
    task_ids: &[Uuid],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<T> {
    if start > end {
        return Vec::new();
    }
    let mut ids = task_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids.iter()
        .flat_map(|id| rows.range((*id, start)..=(*id, end)).map(|(_, row)| row.clone()))
        .collect()
}

impl TaskRepository for InMemoryTaskRepository {
    async fn tasks_on_date(&self, user: &str, date: NaiveDate) -> ServiceResult<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.user_slug == user && !task.is_recurring() && task.anchor_date == date)
            .cloned()
            .collect())
    }

    async fn tasks_in_range(
        &self,
        user: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Task>> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|task| {
                task.user_slug == user
                    && !task.is_recurring()
                    && (start..=end).contains(&task.anchor_date)
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.anchor_date);
        Ok(tasks)
    }

    async fn recurring_tasks(&self, user: &str) -> ServiceResult<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.user_slug == user && task.is_recurring())
            .cloned()
            .collect())
    }

    async fn task_by_id(&self, id: Uuid) -> ServiceResult<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn insert_task(&self, task: Task) -> ServiceResult<Task> {
        let mut state = self.state.write().await;
        if state.position(task.id).is_some() {
            return Err(ServiceError::Conflict(format!(
                "task {} already exists",
                task.id
            )));
        }
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task<F>(&self, id: Uuid, apply: F) -> ServiceResult<Task>
    where
        F: FnOnce(&mut Task) + Send,
    {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        apply(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: Uuid) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        let index = state.position(id).ok_or(ServiceError::NotFound(id))?;
        state.tasks.remove(index);
        state.exceptions.retain(|(task_id, _), _| *task_id != id);
        state.completions.retain(|(task_id, _), _| *task_id != id);
        Ok(())
    }

    async fn exceptions_for_tasks(
        &self,
        task_ids: &[Uuid],
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<TaskException>> {
        let state = self.state.read().await;
        Ok(rows_for(&state.exceptions, task_ids, start, end))
    }

    async fn upsert_exception(&self, exception: TaskException) -> ServiceResult<TaskException> {
        let mut state = self.state.write().await;
        state
            .exceptions
            .insert((exception.task_id, exception.date), exception.clone());
        Ok(exception)
    }

    async fn delete_exception(&self, task_id: Uuid, date: NaiveDate) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        state.exceptions.remove(&(task_id, date));
        Ok(())
    }

    async fn completions_for_tasks(
        &self,
        task_ids: &[Uuid],
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<TaskCompletion>> {
        let state = self.state.read().await;
        Ok(rows_for(&state.completions, task_ids, start, end))
    }

    async fn upsert_completion(&self, completion: TaskCompletion) -> ServiceResult<TaskCompletion> {
        let mut state = self.state.write().await;
        state
            .completions
            .insert((completion.task_id, completion.date), completion.clone());
        Ok(completion)
    }

    async fn delete_completion(&self, task_id: Uuid, date: NaiveDate) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        state.completions.remove(&(task_id, date));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use getitdone_recurrence::model::{OccurrenceOverride, RecurrenceRule};

    use super::*;
    use crate::store::record::{CompletionRecord, TaskRecord};

    fn date(iso: &str) -> NaiveDate {
        NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("valid date")
    }

    #[test_log::test(tokio::test)]
    async fn test_one_off_queries_exclude_recurring_and_other_users() {
        let repo = InMemoryTaskRepository::new();
        let mine = repo
            .insert_task(Task::new("sam", "Dentist", date("2026-03-10")))
            .await
            .expect("insert");
        repo.insert_task(Task::new("alex", "Dentist", date("2026-03-10")))
            .await
            .expect("insert");
        repo.insert_task(
            Task::new("sam", "Walk", date("2026-03-10")).with_recurrence(RecurrenceRule::daily()),
        )
        .await
        .expect("insert");

        let on_date = repo.tasks_on_date("sam", date("2026-03-10")).await.expect("query");
        assert_eq!(on_date, vec![mine]);
        assert_eq!(repo.recurring_tasks("sam").await.expect("query").len(), 1);
        assert!(repo.recurring_tasks("nobody").await.expect("query").is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_tasks_in_range_sorted_by_date() {
        let repo = InMemoryTaskRepository::new();
        let rows = [
            ("c", "2026-03-20"),
            ("a", "2026-03-02"),
            ("b", "2026-03-02"),
            ("x", "2026-04-01"),
        ];
        for (title, on) in rows {
            repo.insert_task(Task::new("sam", title, date(on)))
                .await
                .expect("insert");
        }
        let titles: Vec<_> = repo
            .tasks_in_range("sam", date("2026-03-01"), date("2026-03-31"))
            .await
            .expect("query")
            .into_iter()
            .map(|task| task.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_upserts_replace_and_delete_cascades() {
        let repo = InMemoryTaskRepository::new();
        let task = repo
            .insert_task(
                Task::new("sam", "Walk", date("2026-03-01"))
                    .with_recurrence(RecurrenceRule::daily()),
            )
            .await
            .expect("insert");
        let day = date("2026-03-05");

        repo.upsert_exception(TaskException::skip(task.id, day))
            .await
            .expect("upsert");
        repo.upsert_exception(TaskException::modify(task.id, day, OccurrenceOverride::default()))
            .await
            .expect("upsert");
        let exceptions = repo
            .exceptions_for_tasks(&[task.id, task.id], day, day)
            .await
            .expect("query");
        assert_eq!(exceptions.len(), 1);
        assert!(!exceptions[0].is_skip());

        repo.upsert_completion(TaskCompletion::done(task.id, day, chrono::Utc::now()))
            .await
            .expect("upsert");
        repo.delete_task(task.id).await.expect("delete");

        assert!(repo.task_by_id(task.id).await.expect("query").is_none());
        assert!(
            repo.completions_for_tasks(&[task.id], date("2026-01-01"), date("2026-12-31"))
                .await
                .expect("query")
                .is_empty()
        );
        assert!(matches!(
            repo.delete_task(task.id).await,
            Err(ServiceError::NotFound(id)) if id == task.id
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_update_applies_to_latest_row() {
        let repo = InMemoryTaskRepository::new();
        let task = repo
            .insert_task(Task::new("sam", "Dentist", date("2026-03-10")))
            .await
            .expect("insert");

        repo.update_task(task.id, |row| row.title = "Orthodontist".to_string())
            .await
            .expect("update");
        let updated = repo
            .update_task(task.id, |row| row.completed = true)
            .await
            .expect("update");

        assert_eq!(updated.title, "Orthodontist");
        assert!(updated.completed);
        assert_eq!(
            repo.task_by_id(task.id).await.expect("query"),
            Some(updated)
        );

        let missing = Uuid::new_v4();
        assert!(matches!(
            repo.update_task(missing, |row| row.completed = true).await,
            Err(ServiceError::NotFound(id)) if id == missing
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_rows_outside_range_are_excluded() {
        let repo = InMemoryTaskRepository::new();
        let id = Uuid::new_v4();
        for day in ["2026-02-28", "2026-03-01", "2026-03-31", "2026-04-01"] {
            repo.upsert_completion(TaskCompletion::done(id, date(day), chrono::Utc::now()))
                .await
                .expect("upsert");
        }
        let dates: Vec<_> = repo
            .completions_for_tasks(&[id], date("2026-03-01"), date("2026-03-31"))
            .await
            .expect("query")
            .into_iter()
            .map(|c| c.date)
            .collect();
        assert_eq!(dates, vec![date("2026-03-01"), date("2026-03-31")]);
        assert!(
            repo.completions_for_tasks(&[id], date("2026-03-31"), date("2026-03-01"))
                .await
                .expect("query")
                .is_empty()
        );
    }

    #[test]
    fn test_from_dataset_rejects_duplicates() {
        let task = Task::new("sam", "Dentist", date("2026-03-10"));
        let dataset = Dataset {
            tasks: vec![TaskRecord::from(&task), TaskRecord::from(&task)],
            ..Dataset::default()
        };
        assert!(matches!(
            InMemoryTaskRepository::from_dataset(dataset),
            Err(ServiceError::Conflict(_))
        ));

        let completion = CompletionRecord {
            task_id: task.id,
            date: date("2026-03-10"),
            completed: true,
            completed_at: None,
        };
        let dataset = Dataset {
            completions: vec![completion.clone(), completion],
            ..Dataset::default()
        };
        assert!(InMemoryTaskRepository::from_dataset(dataset).is_err());
    }
}
