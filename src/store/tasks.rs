use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Task, TaskFilter, TaskInput, User},
    store::users,
};

const TASK_COLUMNS: &str = "id, title, description, important, complete, created_at, updated_at";

/// Resolves the owner of a task operation, failing with `NotFound` when the
/// username does not name an existing user.
async fn require_owner(pool: &PgPool, username: &str) -> Result<User, AppError> {
    users::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Creates a task and appends its id to the owner's task list.
///
/// The insert and the list append are a single transaction; a failure on
/// either side leaves no orphaned task and no dangling reference.
pub async fn create(pool: &PgPool, owner: &str, input: TaskInput) -> Result<Task, AppError> {
    let user = require_owner(pool, owner).await?;
    let task = Task::new(input);

    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks ({})
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {}",
        TASK_COLUMNS, TASK_COLUMNS
    ))
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.important)
    .bind(task.complete)
    .bind(task.created_at)
    .bind(task.updated_at)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE users SET task_ids = array_append(task_ids, $1) WHERE id = $2")
        .bind(created.id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(created)
}

/// Lists the owner's tasks, optionally narrowed by a filter predicate,
/// newest first.
pub async fn list(
    pool: &PgPool,
    owner: &str,
    filter: Option<TaskFilter>,
) -> Result<Vec<Task>, AppError> {
    let user = require_owner(pool, owner).await?;

    let predicate = match filter {
        None => "",
        Some(TaskFilter::Important) => " AND important",
        Some(TaskFilter::Completed) => " AND complete",
        Some(TaskFilter::Incomplete) => " AND NOT complete",
    };
    let sql = format!(
        "SELECT {} FROM tasks WHERE id = ANY($1){} ORDER BY created_at DESC",
        TASK_COLUMNS, predicate
    );

    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(&user.task_ids)
        .fetch_all(pool)
        .await?;

    Ok(tasks)
}

/// Overwrites the title and description of an owned task.
pub async fn update(
    pool: &PgPool,
    owner: &str,
    task_id: Uuid,
    input: TaskInput,
) -> Result<Task, AppError> {
    let user = require_owner(pool, owner).await?;
    if !user.owns(task_id) {
        return Err(AppError::NotFound("Task not found".into()));
    }

    let updated = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = $1, description = $2, updated_at = $3
         WHERE id = $4
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.title)
    .bind(&input.description)
    .bind(Utc::now())
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    updated.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Flips the `important` flag of an owned task.
pub async fn toggle_important(pool: &PgPool, owner: &str, task_id: Uuid) -> Result<Task, AppError> {
    toggle_flag(pool, owner, task_id, "important").await
}

/// Flips the `complete` flag of an owned task.
pub async fn toggle_complete(pool: &PgPool, owner: &str, task_id: Uuid) -> Result<Task, AppError> {
    toggle_flag(pool, owner, task_id, "complete").await
}

/// The negation happens inside the single UPDATE, so two concurrent toggles
/// each take effect rather than losing one of the writes.
async fn toggle_flag(
    pool: &PgPool,
    owner: &str,
    task_id: Uuid,
    column: &str,
) -> Result<Task, AppError> {
    let user = require_owner(pool, owner).await?;
    if !user.owns(task_id) {
        return Err(AppError::NotFound("Task not found".into()));
    }

    let sql = format!(
        "UPDATE tasks SET {col} = NOT {col}, updated_at = $1
         WHERE id = $2
         RETURNING {}",
        TASK_COLUMNS,
        col = column
    );

    let toggled = sqlx::query_as::<_, Task>(&sql)
        .bind(Utc::now())
        .bind(task_id)
        .fetch_optional(pool)
        .await?;

    toggled.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Deletes an owned task and prunes its id from the owner's task list.
///
/// Both writes run in one transaction. Deleting the same id a second time
/// fails with `NotFound`.
pub async fn delete(pool: &PgPool, owner: &str, task_id: Uuid) -> Result<(), AppError> {
    let user = require_owner(pool, owner).await?;
    if !user.owns(task_id) {
        return Err(AppError::NotFound("Task not found".into()));
    }

    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(task_id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    sqlx::query("UPDATE users SET task_ids = array_remove(task_ids, $1) WHERE id = $2")
        .bind(task_id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
