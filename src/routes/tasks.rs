use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskQuery},
    store,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// Tasks are resolved through the user's owned-task list and ordered by
/// creation date, newest first.
///
/// ## Query Parameters:
/// - `filter` (optional): `important`, `completed`, or `incomplete`. Absent
///   means the full list.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects (possibly empty).
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the token's user no longer exists.
/// - `500 Internal Server Error`: For store errors.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query_params: web::Query<TaskQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store::tasks::list(&pool, &user.0, query_params.filter).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The new task's id is appended to the user's owned-task list in the same
/// transaction as the insert.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `title`: The title of the task (required, non-empty).
/// - `description`: The description of the task (required, non-empty).
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If input validation on `TaskInput` fails.
/// - `500 Internal Server Error`: For store errors.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = store::tasks::create(&pool, &user.0, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Updates the title and description of an existing task.
///
/// Only a task in the authenticated user's owned-task list can be updated;
/// anything else is reported as not found.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to update.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the user.
/// - `422 Unprocessable Entity`: If input validation on `TaskInput` fails.
/// - `500 Internal Server Error`: For store errors.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store::tasks::update(
        &pool,
        &user.0,
        task_id.into_inner(),
        task_data.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Toggles the `important` flag of an owned task.
///
/// ## Responses:
/// - `200 OK`: Returns the task with the flag flipped.
/// - `401 Unauthorized` / `404 Not Found` / `500 Internal Server Error`: as above.
#[put("/{id}/important")]
pub async fn toggle_important(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = store::tasks::toggle_important(&pool, &user.0, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Toggles the `complete` flag of an owned task.
///
/// ## Responses:
/// - `200 OK`: Returns the task with the flag flipped.
/// - `401 Unauthorized` / `404 Not Found` / `500 Internal Server Error`: as above.
#[put("/{id}/complete")]
pub async fn toggle_complete(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = store::tasks::toggle_complete(&pool, &user.0, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// Removes the task record and prunes the id from the owner's list in one
/// transaction. Deleting the same id again yields 404.
///
/// ## Path Parameters:
/// - `id`: The UUID of the task to delete.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the user.
/// - `500 Internal Server Error`: For store errors.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    store::tasks::delete(&pool, &user.0, task_id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::models::TaskInput;
    use validator::Validate;

    #[test]
    fn test_task_input_validation() {
        // Empty title
        let invalid_input_empty_title = TaskInput {
            title: "".to_string(),
            description: "Test Description".to_string(),
        };
        assert!(
            invalid_input_empty_title.validate().is_err(),
            "Validation should fail for empty title."
        );

        // Empty description
        let invalid_input_empty_desc = TaskInput {
            title: "Valid title".to_string(),
            description: "".to_string(),
        };
        assert!(
            invalid_input_empty_desc.validate().is_err(),
            "Validation should fail for empty description."
        );

        // Valid input
        let valid_input = TaskInput {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
        };
        assert!(
            valid_input.validate().is_ok(),
            "Validation should pass for valid input."
        );
    }
}
