//! Input normalization shared by the repositories and the HTTP layer.
//!
//! Names are stored trimmed and must not be blank; optional free text is
//! trimmed and collapsed to `None` when nothing is left.

use crate::error::CoreError;
use crate::types::DbId;

/// Trim `value` and reject it when blank.
pub fn required_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim optional text, mapping blank input to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Require an identifier supplied as a query parameter.
///
/// `label` is the human-facing name used in the error, e.g. `"Project ID"`.
pub fn required_id(label: &str, value: Option<&str>) -> Result<DbId, CoreError> {
    match value.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CoreError::Validation(format!("{label} is required"))),
    }
}
