//! Shared query parameter types for API handlers.
//!
//! Mutations on collections address their target with `?id=`; list endpoints
//! take the parent id. Both snake_case and camelCase parameter names are
//! accepted.

use serde::Deserialize;

/// `?id=` for update and delete endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// `?project_id=` for listing the tasks of a project.
#[derive(Debug, Deserialize)]
pub struct ProjectFilter {
    #[serde(alias = "projectId")]
    pub project_id: Option<String>,
}

/// `?task_id=` for listing the sessions of a task.
#[derive(Debug, Deserialize)]
pub struct TaskFilter {
    #[serde(alias = "taskId")]
    pub task_id: Option<String>,
}
