//! Client-side mirror of the tracker's project list.
//!
//! [`api::TrackerApi`] is the network seam and [`store::ProjectStore`] keeps
//! a subscribable cache of projects and their tasks in sync with it.

pub mod api;
pub mod error;
pub mod store;

pub use api::{HttpTrackerApi, TrackerApi};
pub use error::ClientError;
pub use store::ProjectStore;
pub use timekeep_core::duration::format_minutes;
