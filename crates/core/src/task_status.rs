//! Task status values and the toggle cycle.
//!
//! Tasks move through a perpetual three-state cycle:
//!
//! ```text
//! suspend -> active -> completed -> suspend -> ...
//! ```
//!
//! Statuses are stored as lowercase text in the `tasks.status` column.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of a task. New tasks start as [`TaskStatus::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Suspend,
    #[default]
    Active,
    Completed,
}

impl TaskStatus {
    /// Every known status, in cycle order starting from `suspend`.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Suspend,
        TaskStatus::Active,
        TaskStatus::Completed,
    ];

    /// The text stored in the database and sent over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Suspend => "suspend",
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
        }
    }

    /// The status that follows `self` in the toggle cycle.
    pub fn next(self) -> TaskStatus {
        match self {
            TaskStatus::Suspend => TaskStatus::Active,
            TaskStatus::Active => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Suspend,
        }
    }

    /// Resolve the toggle target for a raw stored value.
    ///
    /// Unrecognized values (e.g. rows written by an older client) go to
    /// `active`.
    pub fn toggled_from(stored: &str) -> TaskStatus {
        stored
            .parse::<TaskStatus>()
            .map_or(TaskStatus::Active, TaskStatus::next)
    }

    /// Whether a task in this status carries a `completed_at` stamp.
    pub fn is_completed(self) -> bool {
        self == TaskStatus::Completed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown task status '{s}', expected one of: suspend, active, completed"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn cycle_follows_suspend_active_completed() {
        assert_eq!(TaskStatus::Suspend.next(), TaskStatus::Active);
        assert_eq!(TaskStatus::Active.next(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.next(), TaskStatus::Suspend);
    }

    #[test]
    fn three_toggles_return_to_start() {
        for start in TaskStatus::ALL {
            assert_eq!(start.next().next().next(), start);
        }
    }

    #[test]
    fn default_is_active() {
        assert_eq!(TaskStatus::default(), TaskStatus::Active);
    }

    #[test]
    fn toggled_from_known_values() {
        assert_eq!(TaskStatus::toggled_from("suspend"), TaskStatus::Active);
        assert_eq!(TaskStatus::toggled_from("active"), TaskStatus::Completed);
        assert_eq!(TaskStatus::toggled_from("completed"), TaskStatus::Suspend);
    }

    #[test]
    fn toggled_from_unknown_value_goes_active() {
        assert_eq!(TaskStatus::toggled_from("paused"), TaskStatus::Active);
        assert_eq!(TaskStatus::toggled_from(""), TaskStatus::Active);
        assert_eq!(TaskStatus::toggled_from("ACTIVE"), TaskStatus::Active);
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_matches!("done".parse::<TaskStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serde_uses_lowercase_text() {
        let json = serde_json::to_string(&TaskStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let parsed: TaskStatus = serde_json::from_str("\"suspend\"").unwrap();
        assert_eq!(parsed, TaskStatus::Suspend);
        assert_eq!(TaskStatus::Active.to_string(), "active");
    }
}
