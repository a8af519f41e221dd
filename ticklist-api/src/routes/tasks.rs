/// Owner-scoped task endpoints
///
/// All routes here sit behind the auth gate and receive the resolved
/// [`CurrentUser`] explicitly. Every model call is scoped by the caller's id,
/// so a task id belonging to another user reads as `404 Not Found` (never
/// `403`), and the response does not reveal whether the id exists at all.
///
/// # Endpoints
///
/// - `GET /tasks` - list the caller's tasks, oldest first
/// - `POST /tasks` - create a task owned by the caller
/// - `PUT /tasks/:id` - update text and/or completion flag
/// - `DELETE /tasks/:id` - remove a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::CurrentUser,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use ticklist_shared::models::task::{CreateTask, Task, UpdateTask};
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task text; an absent field fails validation the same way as an
    /// empty one
    #[serde(default)]
    pub text: String,
}

/// Update task request; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New task text
    pub text: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,
}

/// Validates and trims task text
///
/// Text must be non-empty after trimming and at most 255 characters.
fn clean_text(text: &str) -> Result<String, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation("Task text cannot be empty.".to_string()));
    }
    if trimmed.chars().count() > 255 {
        return Err(ApiError::Validation(
            "Task text must be at most 255 characters.".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// List all tasks for the authenticated user, creation order
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_owner(&state.db, user.id).await?;
    Ok(Json(tasks))
}

/// Create a new task owned by the authenticated user
///
/// # Errors
///
/// - `400 Bad Request`: text empty/whitespace after trimming, or too long
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let text = clean_text(&req.text)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: user.id,
            text,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Update an existing task for the authenticated user
///
/// The ownership check runs first: an id that is absent or owned by someone
/// else fails with 404 before any field is validated or written.
///
/// # Errors
///
/// - `404 Not Found`: no task with this id belongs to the caller
/// - `400 Bad Request`: provided text trims to empty, or is too long; the
///   row is left untouched
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    Task::find_by_id_and_owner(&state.db, id, user.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Task not found or not authorized to update.".to_string())
        })?;

    let text = match req.text.as_deref() {
        Some(text) => Some(clean_text(text)?),
        None => None,
    };

    // The write is ownership-scoped too; a concurrent delete between the
    // fetch and here surfaces as the same 404
    let task = Task::update(
        &state.db,
        id,
        user.id,
        UpdateTask {
            text,
            completed: req.completed,
        },
    )
    .await?
    .ok_or_else(|| {
        ApiError::NotFound("Task not found or not authorized to update.".to_string())
    })?;

    Ok(Json(task))
}

/// Delete a task for the authenticated user
///
/// # Errors
///
/// - `404 Not Found`: no task with this id belongs to the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete(&state.db, id, user.id).await?;

    if !deleted {
        return Err(ApiError::NotFound(
            "Task not found or not authorized to delete.".to_string(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}
