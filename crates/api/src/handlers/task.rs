//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use timekeep_core::duration::{adjusted_minutes, within_tracked_range, MAX_TRACKED_MINUTES};
use timekeep_core::error::CoreError;
use timekeep_core::normalize::{required_id, required_text};
use timekeep_core::types::DbId;
use timekeep_db::models::task::{CreateTask, Task, UpdateTask};
use timekeep_db::repositories::{ProjectRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::{IdParams, ProjectFilter};
use crate::response::SuccessResponse;
use crate::state::AppState;

/// `action` value that advances the task's status cycle.
pub const ACTION_TOGGLE: &str = "toggle";

/// `action` value that adds `minutes` to the task's tracked time.
pub const ACTION_ADD_TIME: &str = "addTime";

/// Body of `PATCH /tasks?id=`.
///
/// With an `action` the remaining fields are ignored; without one the body is
/// a partial field update.
#[derive(Debug, Deserialize)]
pub struct TaskPatch {
    pub action: Option<String>,
    pub minutes: Option<i64>,
    #[serde(flatten)]
    pub fields: UpdateTask,
}

/// GET /api/tasks?project_id=
pub async fn list_by_project(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<Vec<Task>>> {
    let project_id = required_id("Project ID", filter.project_id.as_deref())?;
    let tasks = TaskRepo::list_by_project(&state.pool, &project_id).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    input.validate()?;
    required_text("name", &input.name)?;

    if ProjectRepo::find_by_id(&state.pool, &input.project_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }));
    }

    let task = TaskRepo::create(&state.pool, &input).await?;
    tracing::info!(task_id = %task.id, project_id = %task.project_id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks?id=
///
/// `{"action": "toggle"}` advances the status cycle, `{"action": "addTime",
/// "minutes": n}` adds time (negative `n` subtracts), anything else is a
/// partial update of `name`, `description`, `status` or `time_spent`.
///
/// Time values that would take `time_spent` outside the tracked range are
/// rejected with 400 before anything is written.
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    AppJson(patch): AppJson<TaskPatch>,
) -> AppResult<Json<Task>> {
    let id = required_id("Task ID", params.id.as_deref())?;

    let task = match patch.action.as_deref() {
        Some(ACTION_TOGGLE) => TaskRepo::toggle_status(&state.pool, &id).await?,
        Some(ACTION_ADD_TIME) => {
            let minutes = patch.minutes.ok_or_else(|| {
                AppError::BadRequest(format!("minutes is required for {ACTION_ADD_TIME}"))
            })?;
            let current = TaskRepo::find_by_id(&state.pool, &id).await?.ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Task",
                    id: id.clone(),
                })
            })?;
            adjusted_minutes(current.time_spent, minutes)?;
            TaskRepo::add_time(&state.pool, &id, minutes).await?
        }
        Some(other) => {
            return Err(AppError::BadRequest(format!("Unknown task action '{other}'")));
        }
        None => {
            if patch.fields.is_empty() {
                return Err(AppError::BadRequest(
                    "No task fields to update".to_string(),
                ));
            }
            patch.fields.validate()?;
            if let Some(time_spent) = patch.fields.time_spent {
                if !within_tracked_range(time_spent) {
                    return Err(AppError::Core(CoreError::Validation(format!(
                        "time_spent must be between -{MAX_TRACKED_MINUTES} and {MAX_TRACKED_MINUTES}"
                    ))));
                }
            }
            if let Some(name) = &patch.fields.name {
                required_text("name", name)?;
            }
            TaskRepo::update(&state.pool, &id, &patch.fields).await?
        }
    };

    let task = task.ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    tracing::debug!(
        task_id = %task.id,
        status = %task.status,
        time_spent = task.time_spent,
        "Task updated"
    );
    Ok(Json(task))
}

/// DELETE /api/tasks?id=
///
/// Removes the task and its time sessions.
pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<SuccessResponse>> {
    let id = required_id("Task ID", params.id.as_deref())?;
    let success = TaskRepo::delete(&state.pool, &id).await?;
    if success {
        tracing::info!(task_id = %id, "Task deleted");
    }
    Ok(Json(SuccessResponse { success }))
}
