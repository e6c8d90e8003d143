//! Error types for task domain validation and parsing.

use super::{TaskStatus, TransitionAction};
use thiserror::Error;

/// Errors returned while applying lifecycle transitions to a task.
///
/// Transitions are never fatal: a rejected transition leaves the task
/// in its prior valid state and the caller decides what to surface.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The requested action is not valid from the current status.
    #[error("{}", .action.rejection())]
    IllegalTransition {
        /// The action that was attempted.
        action: TransitionAction,
        /// The status the task held when the action was attempted.
        status: TaskStatus,
    },

    /// Block was requested without a usable reason string.
    #[error("blocking a task requires a reason")]
    MissingReason,
}

/// Error returned when a negative effort duration is supplied.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid effort duration {0}, expected a non-negative number of seconds")]
pub struct InvalidEffortSeconds(pub i64);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing transition actions from the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transition action: {0}")]
pub struct ParseTransitionActionError(pub String);

/// Error returned while parsing lifecycle event kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown lifecycle event kind: {0}")]
pub struct ParseEventKindError(pub String);

/// Error returned while parsing daily work-log statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown daily task status: {0}")]
pub struct ParseDailyTaskStatusError(pub String);
