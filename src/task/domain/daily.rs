//! Daily work-log status values synchronised by lifecycle transitions.

use super::ParseDailyTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a per-day work-log line for a task.
///
/// The daily log itself is owned by the surrounding application; this
/// core only pushes status updates into it when a task is completed or
/// revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyTaskStatus {
    /// Work is still expected on the logged day.
    Pending,
    /// The logged work was finished.
    Completed,
    /// The logged work was carried over to the next day.
    PushedToNextDay,
}

impl DailyTaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::PushedToNextDay => "pushed_to_next_day",
        }
    }
}

impl fmt::Display for DailyTaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DailyTaskStatus {
    type Error = ParseDailyTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "pushed_to_next_day" => Ok(Self::PushedToNextDay),
            _ => Err(ParseDailyTaskStatusError(value.to_owned())),
        }
    }
}
