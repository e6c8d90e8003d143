//! Lifecycle transition actions and the legality table.
//!
//! The whole transition table lives here. Callers never test statuses
//! directly; they request an action and the table decides.

use super::{DailyTaskStatus, EventKind, ParseTransitionActionError, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action requested against a task's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    /// Begin work on a task.
    Start,
    /// Temporarily stop work on a task.
    Pause,
    /// Pick work back up on a paused or blocked task.
    Resume,
    /// Mark a task as finished.
    Complete,
    /// Mark a task as blocked on an impediment.
    Block,
    /// Lift a block and restore the prior status.
    Unblock,
    /// Send a completed task back for rework.
    Revise,
    /// Retire a task from all active views.
    Archive,
}

impl TransitionAction {
    /// Every action, in table order.
    pub const ALL: [Self; 8] = [
        Self::Start,
        Self::Pause,
        Self::Resume,
        Self::Complete,
        Self::Block,
        Self::Unblock,
        Self::Revise,
        Self::Archive,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Complete => "complete",
            Self::Block => "block",
            Self::Unblock => "unblock",
            Self::Revise => "revise",
            Self::Archive => "archive",
        }
    }

    /// Returns true when this action is legal from the given status.
    #[must_use]
    pub const fn permits(self, source: TaskStatus) -> bool {
        match self {
            Self::Start => matches!(source, TaskStatus::ToDo | TaskStatus::Paused),
            Self::Pause | Self::Complete => matches!(source, TaskStatus::InProgress),
            Self::Resume => matches!(source, TaskStatus::Paused | TaskStatus::Blocked),
            Self::Block => !matches!(source, TaskStatus::Done | TaskStatus::Archived),
            Self::Unblock => matches!(source, TaskStatus::Blocked),
            Self::Revise => matches!(source, TaskStatus::Done),
            Self::Archive => true,
        }
    }

    /// Returns the message surfaced when this action is rejected.
    #[must_use]
    pub const fn rejection(self) -> &'static str {
        match self {
            Self::Start => "Task can only be started from To Do or Paused",
            Self::Pause => "Only tasks in progress can be paused",
            Self::Resume => "Only paused or blocked tasks can be resumed",
            Self::Complete => "Task must be started before it can be completed",
            Self::Block => "Completed or Archived tasks cannot be blocked",
            Self::Unblock => "Only blocked tasks can be unblocked",
            Self::Revise => "Only completed tasks can be revised",
            // Archive is legal from every status; kept for totality.
            Self::Archive => "Tasks can always be archived",
        }
    }
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransitionAction {
    type Error = ParseTransitionActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "start" => Ok(Self::Start),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            "complete" => Ok(Self::Complete),
            "block" => Ok(Self::Block),
            "unblock" => Ok(Self::Unblock),
            "revise" => Ok(Self::Revise),
            "archive" => Ok(Self::Archive),
            _ => Err(ParseTransitionActionError(value.to_owned())),
        }
    }
}

/// Record of one successfully applied transition.
///
/// Names the status change plus the follow-up work the caller owes:
/// the lifecycle event to append (if any) and the daily work-log sync
/// (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    action: TransitionAction,
    from: TaskStatus,
    to: TaskStatus,
    event: Option<EventKind>,
    daily_sync: Option<DailyTaskStatus>,
}

impl TransitionOutcome {
    pub(crate) const fn new(
        action: TransitionAction,
        from: TaskStatus,
        to: TaskStatus,
        event: Option<EventKind>,
        daily_sync: Option<DailyTaskStatus>,
    ) -> Self {
        Self {
            action,
            from,
            to,
            event,
            daily_sync,
        }
    }

    /// Returns the action that was applied.
    #[must_use]
    pub const fn action(self) -> TransitionAction {
        self.action
    }

    /// Returns the status the task transitioned from.
    #[must_use]
    pub const fn from(self) -> TaskStatus {
        self.from
    }

    /// Returns the status the task transitioned to.
    #[must_use]
    pub const fn to(self) -> TaskStatus {
        self.to
    }

    /// Returns the lifecycle event kind to append, if the transition
    /// produces one.
    ///
    /// Only start, pause, resume, and complete feed the session
    /// reconstruction stream; block, unblock, revise, and archive
    /// mutate status without emitting.
    #[must_use]
    pub const fn event(self) -> Option<EventKind> {
        self.event
    }

    /// Returns the daily work-log status to propagate, if any.
    #[must_use]
    pub const fn daily_sync(self) -> Option<DailyTaskStatus> {
        self.daily_sync
    }
}
