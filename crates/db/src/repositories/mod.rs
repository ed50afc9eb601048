//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument. Lookups return `Ok(None)`
//! (or `Ok(false)` for deletes) when the row does not exist; storage errors
//! are returned to the caller untouched.
//!
//! Multi-row writes open a transaction with `pool.begin()` and only commit
//! once every statement succeeded. Returning early drops the transaction,
//! which rolls it back. The `*_in` helpers take a `&mut SqliteConnection` so
//! they can run inside another repository's transaction.

pub mod project_repo;
pub mod task_repo;
pub mod time_session_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use time_session_repo::TimeSessionRepo;
