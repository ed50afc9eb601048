//! Time session entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// A time session row from the `time_sessions` table.
///
/// Sessions are immutable once recorded; they are only created or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TimeSession {
    pub id: DbId,
    pub task_id: DbId,
    pub duration_minutes: i64,
    pub started_at: Timestamp,
    /// Expected to be at or after `started_at`; not enforced.
    pub ended_at: Timestamp,
    pub notes: Option<String>,
}

/// DTO for recording a new time session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTimeSession {
    #[serde(default, alias = "taskId")]
    #[validate(length(min = 1, message = "task_id is required"))]
    pub task_id: DbId,
    #[serde(alias = "durationMinutes")]
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: i64,
    #[serde(alias = "startedAt")]
    pub started_at: Timestamp,
    #[serde(alias = "endedAt")]
    pub ended_at: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
}
