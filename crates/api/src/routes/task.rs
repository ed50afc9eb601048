//! Route definitions for the `/tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /?project_id=  -> list_by_project
/// POST   /              -> create
/// PATCH  /?id=          -> update (toggle, addTime or field update)
/// DELETE /?id=          -> delete
/// GET    /{id}          -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(task::list_by_project)
                .post(task::create)
                .patch(task::update)
                .delete(task::delete),
        )
        .route("/{id}", get(task::get_by_id))
}
