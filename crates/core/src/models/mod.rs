//! Wire models shared by the server and the client mirror.
//!
//! Each submodule contains:
//! - A `Serialize` + `Deserialize` entity struct matching the database row
//!   (also `sqlx::FromRow` with the `sqlx` feature)
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity supports partial updates
//!
//! Request DTOs accept the camelCase field names sent by older clients as
//! aliases of the snake_case column names.

pub mod project;
pub mod task;
pub mod time_session;
