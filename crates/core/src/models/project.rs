//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::task::Task;
use crate::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    /// Sum of `time_spent` over the project's tasks.
    pub total_minutes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project together with all of its tasks, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// DTO for creating a new project.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProject {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "color is required"))]
    pub color: String,
}

/// DTO for updating an existing project. All fields are optional.
///
/// An empty `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub color: Option<String>,
}
