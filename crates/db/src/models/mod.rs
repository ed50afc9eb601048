//! Row types for the repositories.
//!
//! The structs live in `timekeep_core::models` so the client mirror can use
//! them without linking SQLite; this crate enables their `FromRow` derives.

pub use timekeep_core::models::{project, task, time_session};
