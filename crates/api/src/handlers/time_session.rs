//! Handlers for the `/time-sessions` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use timekeep_core::duration::adjusted_minutes;
use timekeep_core::error::CoreError;
use timekeep_core::normalize::required_id;
use timekeep_db::models::time_session::{CreateTimeSession, TimeSession};
use timekeep_db::repositories::{TaskRepo, TimeSessionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::{IdParams, TaskFilter};
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/time-sessions?task_id=
pub async fn list_by_task(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<Json<Vec<TimeSession>>> {
    let task_id = required_id("Task ID", filter.task_id.as_deref())?;
    let sessions = TimeSessionRepo::list_by_task(&state.pool, &task_id).await?;
    Ok(Json(sessions))
}

/// POST /api/time-sessions
///
/// Records the session and credits its duration to the task in one
/// transaction. A duration that would take the task's time out of the
/// tracked range is rejected with 400.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTimeSession>,
) -> AppResult<(StatusCode, Json<TimeSession>)> {
    input.validate()?;

    let task = TaskRepo::find_by_id(&state.pool, &input.task_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Task",
                id: input.task_id.clone(),
            })
        })?;
    adjusted_minutes(task.time_spent, input.duration_minutes)?;

    let session = TimeSessionRepo::create(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: input.task_id,
        }))?;
    tracing::info!(
        session_id = %session.id,
        task_id = %session.task_id,
        duration_minutes = session.duration_minutes,
        "Time session recorded"
    );
    Ok((StatusCode::CREATED, Json(session)))
}

/// DELETE /api/time-sessions?id=
///
/// Removes the session and takes its duration back off the task.
pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<SuccessResponse>> {
    let id = required_id("Time session ID", params.id.as_deref())?;
    let success = TimeSessionRepo::delete(&state.pool, &id).await?;
    if success {
        tracing::info!(session_id = %id, "Time session deleted");
    }
    Ok(Json(SuccessResponse { success }))
}
