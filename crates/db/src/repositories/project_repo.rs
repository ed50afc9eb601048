//! Repository for the `projects` table.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqliteConnection;
use timekeep_core::normalize::optional_text;
use timekeep_core::types::{new_id, next_timestamp, DbId};

use crate::models::project::{CreateProject, Project, ProjectWithTasks, UpdateProject};
use crate::models::task::Task;
use crate::repositories::task_repo;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, color, total_minutes, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Name, description and color are trimmed; a blank description is stored
    /// as `NULL`. `created_at` and `updated_at` share the same instant.
    pub async fn create(pool: &DbPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO projects (id, name, description, color, total_minutes, created_at, updated_at)
             VALUES (?, ?, ?, ?, 0, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(new_id())
            .bind(input.name.trim())
            .bind(optional_text(input.description.as_deref()))
            .bind(input.color.trim())
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_in(&mut *conn, id).await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Project>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_in(&mut *conn).await
    }

    /// List all projects (newest first), each with its tasks attached.
    ///
    /// Reads projects and tasks in two queries within one transaction and
    /// groups tasks by `project_id` through a hash map, so the cost is linear
    /// in the number of projects plus tasks.
    pub async fn list_with_tasks(pool: &DbPool) -> Result<Vec<ProjectWithTasks>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let projects = Self::list_in(&mut *tx).await?;
        let tasks = task_repo::list_all_in(&mut *tx).await?;

        tx.commit().await?;

        let mut tasks_by_project: HashMap<DbId, Vec<Task>> = HashMap::new();
        for task in tasks {
            tasks_by_project
                .entry(task.project_id.clone())
                .or_default()
                .push(task);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let tasks = tasks_by_project.remove(&project.id).unwrap_or_default();
                ProjectWithTasks { project, tasks }
            })
            .collect())
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::find_in(&mut *tx, id).await? else {
            return Ok(None);
        };

        let name = input
            .name
            .as_deref()
            .map_or(current.name, |name| name.trim().to_string());
        let description = match input.description.as_deref() {
            Some(description) => optional_text(Some(description)),
            None => current.description,
        };
        let color = input
            .color
            .as_deref()
            .map_or(current.color, |color| color.trim().to_string());

        let query = format!(
            "UPDATE projects SET name = ?, description = ?, color = ?, updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .bind(description)
            .bind(color)
            .bind(next_timestamp(current.updated_at))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    ///
    /// Tasks and their time sessions are removed by `ON DELETE CASCADE`.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub(crate) async fn find_in(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    async fn list_in(conn: &mut SqliteConnection) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// Recompute `total_minutes` for a project from its tasks.
    ///
    /// Called by every operation that changes a task's `time_spent` or removes
    /// a task, on the same connection (and so the same transaction). The
    /// project's `updated_at` is only bumped when the total actually changes.
    pub(crate) async fn sync_total_minutes(
        conn: &mut SqliteConnection,
        project_id: &str,
    ) -> Result<(), sqlx::Error> {
        let Some(current) = Self::find_in(conn, project_id).await? else {
            return Ok(());
        };

        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(time_spent), 0) FROM tasks WHERE project_id = ?",
        )
        .bind(project_id)
        .fetch_one(&mut *conn)
        .await?;

        if total == current.total_minutes {
            return Ok(());
        }

        sqlx::query("UPDATE projects SET total_minutes = ?, updated_at = ? WHERE id = ?")
            .bind(total)
            .bind(next_timestamp(current.updated_at))
            .bind(project_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
