use serde::{Deserialize, Serialize};

/// Represents a task as stored in the tasks record file and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier, derived from the creation time in milliseconds.
    pub id: i64,
    pub name: String,
    pub description: String,
    pub completed: bool,
    /// Username of the account that created the task.
    pub creator: String,
}

/// Request body for creating a task and for replacing one on update.
///
/// Every field is optional on the wire. Omitted fields take their empty value, so an
/// update that leaves out `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskInput {
    pub name: String,
    pub description: String,
    pub completed: bool,
}

impl Task {
    /// Creates a new, not yet completed task owned by `creator`.
    pub fn new(id: i64, input: TaskInput, creator: &str) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            completed: false,
            creator: creator.to_string(),
        }
    }

    /// Replaces the editable fields wholesale; `id` and `creator` are kept.
    pub fn apply(&mut self, input: TaskInput) {
        self.name = input.name;
        self.description = input.description;
        self.completed = input.completed;
    }
}
