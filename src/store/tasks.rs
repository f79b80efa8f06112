use chrono::Utc;

use super::{Collection, RecordStore};
use crate::error::AppError;
use crate::models::{Task, TaskInput};

/// Task store: the full task list, shared by every authenticated user.
pub struct TaskStore {
    tasks: Collection<Task>,
}

/// Picks an id from the current time in milliseconds, bumped past the highest id in use
/// so two tasks created within the same millisecond still get distinct ids.
fn next_id(tasks: &[Task], now_millis: i64) -> i64 {
    match tasks.iter().map(|t| t.id).max() {
        Some(highest) if highest >= now_millis => highest + 1,
        _ => now_millis,
    }
}

impl TaskStore {
    pub fn new(backend: impl RecordStore<Task> + 'static) -> Self {
        Self {
            tasks: Collection::new(backend),
        }
    }

    pub async fn list(&self) -> Result<Vec<Task>, AppError> {
        self.tasks.read_all().await
    }

    pub async fn create(&self, input: TaskInput, creator: &str) -> Result<Task, AppError> {
        self.tasks
            .modify(|tasks| {
                let task = Task::new(next_id(tasks, Utc::now().timestamp_millis()), input, creator);
                tasks.push(task.clone());
                Ok(task)
            })
            .await
    }

    pub async fn update(&self, id: i64, input: TaskInput) -> Result<Task, AppError> {
        self.tasks
            .modify(|tasks| {
                let task = tasks
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
                task.apply(input);
                Ok(task.clone())
            })
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.tasks
            .modify(|tasks| {
                let before = tasks.len();
                tasks.retain(|t| t.id != id);
                if tasks.len() == before {
                    return Err(AppError::NotFound("Task not found".into()));
                }
                Ok(())
            })
            .await
    }
}
