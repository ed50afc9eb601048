//! Route definitions for the `/time-sessions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::time_session;
use crate::state::AppState;

/// Routes mounted at `/time-sessions`.
///
/// ```text
/// GET    /?task_id=  -> list_by_task
/// POST   /           -> create
/// DELETE /?id=       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(time_session::list_by_task)
            .post(time_session::create)
            .delete(time_session::delete),
    )
}
