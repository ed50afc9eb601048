//! Shared response payloads.
//!
//! Successful responses return records directly without an envelope; the only
//! shared shape is the outcome of a delete.

use serde::{Deserialize, Serialize};

/// `{ "success": bool }` returned by delete endpoints.
///
/// `success` is `false` when no row with the requested id existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
