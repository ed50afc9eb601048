//! Shared domain building blocks for the timekeep workspace.
//!
//! Holds the primitive types, the domain error, the task status cycle, the
//! wire models and the small pure helpers (input normalization, duration
//! formatting) used by both the server and the client mirror.

pub mod duration;
pub mod error;
pub mod models;
pub mod normalize;
pub mod task_status;
pub mod types;
