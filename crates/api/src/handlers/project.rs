//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use timekeep_core::error::CoreError;
use timekeep_core::normalize::{required_id, required_text};
use timekeep_core::types::DbId;
use timekeep_db::models::project::{CreateProject, Project, ProjectWithTasks, UpdateProject};
use timekeep_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::IdParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/projects
///
/// Every project, newest first, with its tasks nested under `tasks`.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectWithTasks>>> {
    let projects = ProjectRepo::list_with_tasks(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    required_text("name", &input.name)?;
    required_text("color", &input.color)?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = %project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PATCH /api/projects?id=
pub async fn update(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let id = required_id("Project ID", params.id.as_deref())?;
    input.validate()?;
    if let Some(name) = &input.name {
        required_text("name", name)?;
    }
    if let Some(color) = &input.color {
        required_text("color", color)?;
    }

    let project = ProjectRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/projects?id=
///
/// Removes the project with all of its tasks and time sessions.
pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<SuccessResponse>> {
    let id = required_id("Project ID", params.id.as_deref())?;
    let success = ProjectRepo::delete(&state.pool, &id).await?;
    if success {
        tracing::info!(project_id = %id, "Project deleted");
    }
    Ok(Json(SuccessResponse { success }))
}
