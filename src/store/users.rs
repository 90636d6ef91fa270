use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppError, models::User};

/// Creates a new user with an already-hashed password.
///
/// Username and email are each checked for prior registration; the unique
/// constraints on the table back these checks up, and a constraint violation
/// also surfaces as `AppError::Duplicate`.
pub async fn create(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<Uuid, AppError> {
    let username_taken = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    if username_taken.is_some() {
        return Err(AppError::Duplicate("Username already exists".into()));
    }

    let email_taken = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    if email_taken.is_some() {
        return Err(AppError::Duplicate("Email already exists".into()));
    }

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, task_ids)
         VALUES ($1, $2, $3, $4, '{}')",
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Looks a user up by username. Returns `Ok(None)` when no such user exists,
/// so login can answer "invalid credentials" without leaking which field was
/// wrong.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, task_ids, created_at
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
