//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::task_status::TaskStatus;
use crate::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Raw stored status; see [`TaskStatus`] for the known values.
    pub status: String,
    /// Minutes tracked against this task. May go negative after inconsistent
    /// manual adjustments; it is never clamped.
    pub time_spent: i64,
    pub created_at: Timestamp,
    /// Set while `status` is `completed`, `None` otherwise.
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl Task {
    /// The parsed status, or `None` when the stored value is not recognized.
    pub fn parsed_status(&self) -> Option<TaskStatus> {
        self.status.parse().ok()
    }
}

/// DTO for creating a new task. New tasks are always `active` with no time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    #[serde(default, alias = "projectId")]
    #[validate(length(min = 1, message = "project_id is required"))]
    pub project_id: DbId,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// DTO for updating an existing task. All fields are optional.
///
/// Setting `status` applies the same `completed_at` rule as toggling.
/// Setting `time_spent` overwrites the total outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(alias = "timeSpent")]
    pub time_spent: Option<i64>,
}

impl UpdateTask {
    /// Whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.time_spent.is_none()
    }
}
