pub mod health;
pub mod project;
pub mod task;
pub mod time_session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                 list (GET), create (POST), update (PATCH ?id=), delete (DELETE ?id=)
/// /projects/{id}            get
///
/// /tasks                    list (GET ?project_id=), create (POST),
///                           toggle / addTime / update (PATCH ?id=), delete (DELETE ?id=)
/// /tasks/{id}               get
///
/// /time-sessions            list (GET ?task_id=), create (POST), delete (DELETE ?id=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/time-sessions", time_session::router())
}
