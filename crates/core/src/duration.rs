//! Minute totals: bounds for tracked time and human-readable formatting.

use crate::error::CoreError;

/// Largest magnitude a task's `time_spent`, a time adjustment or a session
/// duration may have (roughly 1900 years). Keeps every stored total and every
/// project sum far away from `i64` overflow.
pub const MAX_TRACKED_MINUTES: i64 = 1_000_000_000;

/// Whether `minutes` lies within `-MAX_TRACKED_MINUTES..=MAX_TRACKED_MINUTES`.
pub fn within_tracked_range(minutes: i64) -> bool {
    minutes.unsigned_abs() <= MAX_TRACKED_MINUTES.unsigned_abs()
}

/// `current + delta` for a time adjustment.
///
/// Rejects a delta outside the tracked range, and a result that would leave
/// it, with a validation error.
pub fn adjusted_minutes(current: i64, delta: i64) -> Result<i64, CoreError> {
    if !within_tracked_range(delta) {
        return Err(CoreError::Validation(format!(
            "minutes must be between -{MAX_TRACKED_MINUTES} and {MAX_TRACKED_MINUTES}"
        )));
    }
    current
        .checked_add(delta)
        .filter(|total| within_tracked_range(*total))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "time_spent would leave the range -{MAX_TRACKED_MINUTES}..={MAX_TRACKED_MINUTES}"
            ))
        })
}

/// Split a minute total into whole hours and remaining minutes.
///
/// Negative totals split on their magnitude with both parts negative, so
/// `-90` becomes `(-1, -30)`.
pub fn split_minutes(total_minutes: i64) -> (i64, i64) {
    (total_minutes / 60, total_minutes % 60)
}

/// Format a minute total as `"2h 30m"`, `"45m"`, `"2h"` or `"0m"`.
///
/// Negative totals (possible after inconsistent time adjustments) keep a
/// leading minus sign: `-90` formats as `"-1h 30m"`.
pub fn format_minutes(total_minutes: i64) -> String {
    if total_minutes == 0 {
        return "0m".to_string();
    }

    let sign = if total_minutes < 0 { "-" } else { "" };
    let magnitude = total_minutes.unsigned_abs();
    let hours = magnitude / 60;
    let minutes = magnitude % 60;

    match (hours, minutes) {
        (0, m) => format!("{sign}{m}m"),
        (h, 0) => format!("{sign}{h}h"),
        (h, m) => format!("{sign}{h}h {m}m"),
    }
}
