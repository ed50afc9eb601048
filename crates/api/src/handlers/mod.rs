//! Request handlers.
//!
//! Each submodule provides async handler functions for a single entity type.
//! Handlers validate input, delegate to the corresponding repository in
//! `timekeep_db` and map errors via [`AppError`](crate::error::AppError).
//! They hold no state and no business rules of their own.

pub mod project;
pub mod task;
pub mod time_session;
