use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::TaskInput,
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Lists every task in the store.
///
/// The list is not filtered by creator: any authenticated user sees all tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized` / `403 Forbidden`: missing or rejected bearer token.
/// - `500 Internal Server Error`: the tasks file could not be read.
#[get("")]
pub async fn list_tasks(
    tasks: web::Data<TaskStore>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task stamped with the caller as `creator`.
///
/// ## Request Body:
/// - `name`, `description`: stored as given; omitted fields become empty strings.
///
/// The new task always starts with `completed = false` and gets a fresh time-derived id.
///
/// ## Responses:
/// - `201 Created`: the created `Task`.
/// - `401 Unauthorized` / `403 Forbidden`: missing or rejected bearer token.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskStore>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(task_data.into_inner(), &user.username).await?;

    log::info!("User {:?} created task {}", user.username, task.id);
    Ok(HttpResponse::Created().json(task))
}

/// Replaces `name`, `description` and `completed` of an existing task.
///
/// This is a full replace, not a merge: a field left out of the body is reset to its
/// empty value. Any authenticated user may update any task.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: no task with that id.
/// - `401 Unauthorized` / `403 Forbidden`: missing or rejected bearer token.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .update(task_id.into_inner(), task_data.into_inner())
        .await?;

    log::info!("User {:?} updated task {}", user.username, task.id);
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by id.
///
/// ## Responses:
/// - `200 OK`: plain-text confirmation.
/// - `404 Not Found`: no task with that id.
/// - `401 Unauthorized` / `403 Forbidden`: missing or rejected bearer token.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    tasks.delete(id).await?;

    log::info!("User {:?} deleted task {}", user.username, id);
    Ok(HttpResponse::Ok().body("Task deleted"))
}
