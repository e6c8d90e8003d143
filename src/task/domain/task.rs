//! Task aggregate root and lifecycle transition application.

use super::{
    DailyTaskStatus, EffortSeconds, EventKind, TaskId, TaskStatus, TransitionAction,
    TransitionError, TransitionOutcome,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Created in [`TaskStatus::ToDo`] and mutated exclusively through
/// [`Task::apply`]; the aggregate never deletes itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    status: TaskStatus,
    previous_status: Option<TaskStatus>,
    block_reason: Option<String>,
    due_date: Option<NaiveDate>,
    actual_completion_date: Option<DateTime<Utc>>,
    manual_effort_override: Option<EffortSeconds>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Status held before the current block, if blocked.
    pub previous_status: Option<TaskStatus>,
    /// Reason recorded when the task was blocked.
    pub block_reason: Option<String>,
    /// Agreed due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Timestamp of the most recent completion.
    pub actual_completion_date: Option<DateTime<Utc>>,
    /// Manual effort override in whole seconds.
    pub manual_effort_override: Option<EffortSeconds>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::ToDo`].
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            status: TaskStatus::ToDo,
            previous_status: None,
            block_reason: None,
            due_date: None,
            actual_completion_date: None,
            manual_effort_override: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Sets the agreed due date on a freshly created task.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            status: data.status,
            previous_status: data.previous_status,
            block_reason: data.block_reason,
            due_date: data.due_date,
            actual_completion_date: data.actual_completion_date,
            manual_effort_override: data.manual_effort_override,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the status held before the current block.
    ///
    /// Set only while the task is blocked; restored by `unblock`.
    #[must_use]
    pub const fn previous_status(&self) -> Option<TaskStatus> {
        self.previous_status
    }

    /// Returns the reason recorded when the task was blocked.
    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        self.block_reason.as_deref()
    }

    /// Returns the agreed due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the timestamp of the most recent completion.
    #[must_use]
    pub const fn actual_completion_date(&self) -> Option<DateTime<Utc>> {
        self.actual_completion_date
    }

    /// Returns the manual effort override, if one has been recorded.
    #[must_use]
    pub const fn manual_effort_override(&self) -> Option<EffortSeconds> {
        self.manual_effort_override
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records or clears the manual effort override.
    pub fn set_manual_effort_override(
        &mut self,
        effort: Option<EffortSeconds>,
        clock: &impl Clock,
    ) {
        self.manual_effort_override = effort;
        self.touch(clock);
    }

    /// Applies a lifecycle transition.
    ///
    /// Legality is decided against the *current* status by the single
    /// transition table in [`TransitionAction::permits`]. On success the
    /// aggregate is mutated and the returned outcome names the lifecycle
    /// event to append and the daily-log sync to perform, if any. On
    /// rejection the aggregate is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::IllegalTransition`] when the action is
    /// not legal from the current status, and
    /// [`TransitionError::MissingReason`] when `block` is requested
    /// without a non-empty reason.
    pub fn apply(
        &mut self,
        action: TransitionAction,
        reason: Option<&str>,
        clock: &impl Clock,
    ) -> Result<TransitionOutcome, TransitionError> {
        let from = self.status;
        if !action.permits(from) {
            return Err(TransitionError::IllegalTransition {
                action,
                status: from,
            });
        }

        let mut event = None;
        let mut daily_sync = None;
        match action {
            TransitionAction::Start => {
                self.status = TaskStatus::InProgress;
                // A start from Paused is a resumption in the audit trail.
                event = Some(if from == TaskStatus::Paused {
                    EventKind::Resumed
                } else {
                    EventKind::Started
                });
            }
            TransitionAction::Pause => {
                self.status = TaskStatus::Paused;
                event = Some(EventKind::Paused);
            }
            TransitionAction::Resume => {
                self.status = TaskStatus::InProgress;
                event = Some(EventKind::Resumed);
            }
            TransitionAction::Complete => {
                self.status = TaskStatus::Done;
                self.actual_completion_date = Some(clock.utc());
                event = Some(EventKind::Completed);
                daily_sync = Some(DailyTaskStatus::Completed);
            }
            TransitionAction::Block => {
                let trimmed = reason.map(str::trim).filter(|value| !value.is_empty());
                let Some(block_reason) = trimmed else {
                    return Err(TransitionError::MissingReason);
                };
                self.previous_status = Some(from);
                self.block_reason = Some(block_reason.to_owned());
                self.status = TaskStatus::Blocked;
            }
            TransitionAction::Unblock => {
                self.status = self.previous_status.take().unwrap_or(TaskStatus::ToDo);
                self.block_reason = None;
            }
            TransitionAction::Revise => {
                self.status = TaskStatus::ToDo;
                daily_sync = Some(DailyTaskStatus::Pending);
            }
            TransitionAction::Archive => {
                // Block metadata is left as-is; archiving only retires
                // the task from active views.
                self.status = TaskStatus::Archived;
            }
        }

        self.touch(clock);
        Ok(TransitionOutcome::new(
            action,
            from,
            self.status,
            event,
            daily_sync,
        ))
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
