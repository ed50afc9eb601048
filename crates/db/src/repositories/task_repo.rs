//! Repository for the `tasks` table.
//!
//! Every write that changes `time_spent` (or removes a task) also re-syncs the
//! owning project's `total_minutes` in the same transaction.

use chrono::Utc;
use sqlx::SqliteConnection;
use timekeep_core::normalize::optional_text;
use timekeep_core::task_status::TaskStatus;
use timekeep_core::types::{new_id, next_timestamp, Timestamp};

use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::repositories::ProjectRepo;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, status, time_spent, \
                       created_at, completed_at, updated_at";

/// Provides CRUD operations and the status/time bookkeeping for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// New tasks are `active` with no tracked time. Fails with a foreign key
    /// violation if `project_id` does not exist.
    pub async fn create(pool: &DbPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO tasks
                (id, project_id, name, description, status, time_spent, created_at, completed_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 0, ?, NULL, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(new_id())
            .bind(&input.project_id)
            .bind(input.name.trim())
            .bind(optional_text(input.description.as_deref()))
            .bind(TaskStatus::default().as_str())
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Task>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_in(&mut *conn, id).await
    }

    /// List the tasks of a project, most recently created first.
    pub async fn list_by_project(pool: &DbPool, project_id: &str) -> Result<Vec<Task>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE project_id = ? ORDER BY created_at DESC");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always refreshed.
    ///
    /// A new `status` sets `completed_at` when it is `completed` (keeping the
    /// original stamp if the task was already completed) and clears it
    /// otherwise. A new `time_spent` re-syncs the project total.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::find_in(&mut *tx, id).await? else {
            return Ok(None);
        };

        let updated_at = next_timestamp(current.updated_at);
        let (status, completed_at) = match input.status {
            Some(status) => {
                let completed_at = completed_at_for(status, &current, updated_at);
                (status.as_str().to_string(), completed_at)
            }
            None => (current.status.clone(), current.completed_at),
        };
        let name = input
            .name
            .as_deref()
            .map_or(current.name.clone(), |name| name.trim().to_string());
        let description = match input.description.as_deref() {
            Some(description) => optional_text(Some(description)),
            None => current.description.clone(),
        };
        let time_spent = input.time_spent.unwrap_or(current.time_spent);

        let query = format!(
            "UPDATE tasks SET name = ?, description = ?, status = ?, time_spent = ?,
                completed_at = ?, updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(name)
            .bind(description)
            .bind(status)
            .bind(time_spent)
            .bind(completed_at)
            .bind(updated_at)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if task.time_spent != current.time_spent {
            ProjectRepo::sync_total_minutes(&mut *tx, &task.project_id).await?;
        }

        tx.commit().await?;
        Ok(Some(task))
    }

    /// Advance a task to the next status in the cycle
    /// `suspend -> active -> completed -> suspend`.
    ///
    /// Entering `completed` stamps `completed_at`; any other target clears it.
    /// An unrecognized stored status moves to `active`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn toggle_status(pool: &DbPool, id: &str) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::find_in(&mut *tx, id).await? else {
            return Ok(None);
        };

        let next = TaskStatus::toggled_from(&current.status);
        let updated_at = next_timestamp(current.updated_at);
        let completed_at = next.is_completed().then_some(updated_at);

        let query = format!(
            "UPDATE tasks SET status = ?, completed_at = ?, updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(next.as_str())
            .bind(completed_at)
            .bind(updated_at)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(task))
    }

    /// Add `delta_minutes` to a task's `time_spent` (and its project's total).
    ///
    /// `delta_minutes` may be negative. The result is not clamped at zero:
    /// subtracting more than the current total yields a negative value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn add_time(
        pool: &DbPool,
        id: &str,
        delta_minutes: i64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let task = Self::add_time_in(&mut *tx, id, delta_minutes).await?;
        tx.commit().await?;
        Ok(task)
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    ///
    /// Its time sessions are removed by `ON DELETE CASCADE`; the project total
    /// drops by the task's `time_spent`.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(task) = Self::find_in(&mut *tx, id).await? else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        ProjectRepo::sync_total_minutes(&mut *tx, &task.project_id).await?;

        tx.commit().await?;
        Ok(true)
    }

    pub(crate) async fn find_in(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Time adjustment on an existing connection, so session bookkeeping can
    /// share the caller's transaction.
    pub(crate) async fn add_time_in(
        conn: &mut SqliteConnection,
        id: &str,
        delta_minutes: i64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let Some(current) = Self::find_in(conn, id).await? else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE tasks SET time_spent = time_spent + ?, updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(delta_minutes)
            .bind(next_timestamp(current.updated_at))
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        ProjectRepo::sync_total_minutes(conn, &task.project_id).await?;
        Ok(Some(task))
    }
}

/// Every task row, newest first. Used to build the project list in one pass.
pub(crate) async fn list_all_in(conn: &mut SqliteConnection) -> Result<Vec<Task>, sqlx::Error> {
    let query = format!("SELECT {COLUMNS} FROM tasks ORDER BY created_at DESC");
    sqlx::query_as::<_, Task>(&query)
        .fetch_all(&mut *conn)
        .await
}

/// `completed_at` after an explicit status change to `status`.
fn completed_at_for(status: TaskStatus, current: &Task, now: Timestamp) -> Option<Timestamp> {
    if !status.is_completed() {
        return None;
    }
    match current.parsed_status() {
        Some(TaskStatus::Completed) => current.completed_at.or(Some(now)),
        _ => Some(now),
    }
}
