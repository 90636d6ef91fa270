use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or updating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Required, non-empty.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// The description of the task. Required, non-empty.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Represents a task entity as stored in the database and returned by the API.
///
/// The record carries no owner column: a task is reachable only through the
/// `task_ids` list of the user who created it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// The description of the task.
    pub description: String,
    /// Whether the task is flagged important. Defaults to false.
    pub important: bool,
    /// Whether the task is marked complete. Defaults to false.
    pub complete: bool,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Predicate for narrowing a task listing. `important` and `complete` are
/// independent flags, so the filters are disjoint views over the same list.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    /// Only tasks flagged important.
    Important,
    /// Only tasks marked complete.
    Completed,
    /// Only tasks not yet complete.
    Incomplete,
}

/// Represents query parameters for filtering tasks when listing them.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Optional predicate; absent means the full list.
    pub filter: Option<TaskFilter>,
}

impl Task {
    /// Creates a new `Task` instance from `TaskInput`.
    /// Both flags start false; `created_at` and `updated_at` are set to now,
    /// and `id` to a new UUID.
    pub fn new(input: TaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            important: false,
            complete: false,
            created_at: now,
            updated_at: now,
        }
    }
}
