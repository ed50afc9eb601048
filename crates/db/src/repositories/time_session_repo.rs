//! Repository for the `time_sessions` table.
//!
//! A session and the matching credit on its task's `time_spent` are always
//! written together: both statements share one transaction, so either both
//! land or neither does.

use sqlx::SqliteConnection;
use timekeep_core::normalize::optional_text;
use timekeep_core::types::new_id;

use crate::models::time_session::{CreateTimeSession, TimeSession};
use crate::repositories::TaskRepo;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, duration_minutes, started_at, ended_at, notes";

/// Provides create/delete/list operations for time sessions.
pub struct TimeSessionRepo;

impl TimeSessionRepo {
    /// Record a session and credit its duration to the task.
    ///
    /// Returns `None` (writing nothing) if the task does not exist.
    pub async fn create(
        pool: &DbPool,
        input: &CreateTimeSession,
    ) -> Result<Option<TimeSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if TaskRepo::find_in(&mut *tx, &input.task_id).await?.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO time_sessions (id, task_id, duration_minutes, started_at, ended_at, notes)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, TimeSession>(&query)
            .bind(new_id())
            .bind(&input.task_id)
            .bind(input.duration_minutes)
            .bind(input.started_at)
            .bind(input.ended_at)
            .bind(optional_text(input.notes.as_deref()))
            .fetch_one(&mut *tx)
            .await?;

        TaskRepo::add_time_in(&mut *tx, &session.task_id, session.duration_minutes)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Find a session by its ID.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<TimeSession>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_in(&mut *conn, id).await
    }

    /// List the sessions of a task, most recently started first.
    pub async fn list_by_task(
        pool: &DbPool,
        task_id: &str,
    ) -> Result<Vec<TimeSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_sessions WHERE task_id = ? ORDER BY started_at DESC"
        );
        sqlx::query_as::<_, TimeSession>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a session and take its duration back off the task.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(session) = Self::find_in(&mut *tx, id).await? else {
            return Ok(false);
        };

        TaskRepo::add_time_in(&mut *tx, &session.task_id, -session.duration_minutes).await?;

        let result = sqlx::query("DELETE FROM time_sessions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_in(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<TimeSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_sessions WHERE id = ?");
        sqlx::query_as::<_, TimeSession>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}
