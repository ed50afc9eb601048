//! Timekeep API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so
//! integration tests, the client crate's end-to-end tests and the binary
//! entrypoint can all assemble the same application.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
