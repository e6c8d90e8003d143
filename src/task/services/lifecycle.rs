//! Service layer orchestrating task lifecycle transitions.

use crate::task::{
    domain::{
        ActorId, EffortSeconds, LifecycleEvent, Task, TaskId, TransitionAction, TransitionError,
    },
    ports::{
        DailyLogError, DailyLogSync, EventStore, EventStoreError, StatusPolicy, StatusRejection,
        TaskRepository, TaskRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreateTaskRequest {
    due_date: Option<NaiveDate>,
    manual_effort_override: Option<EffortSeconds>,
}

impl CreateTaskRequest {
    /// Creates an empty request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            due_date: None,
            manual_effort_override: None,
        }
    }

    /// Sets the agreed due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets an initial manual effort override.
    #[must_use]
    pub const fn with_manual_effort_override(mut self, effort: EffortSeconds) -> Self {
        self.manual_effort_override = Some(effort);
        self
    }
}

/// Request payload for a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    task_id: TaskId,
    action: TransitionAction,
    actor: ActorId,
    reason: Option<String>,
}

impl TransitionRequest {
    /// Creates a transition request.
    #[must_use]
    pub const fn new(task_id: TaskId, action: TransitionAction, actor: ActorId) -> Self {
        Self {
            task_id,
            action,
            actor,
            reason: None,
        }
    }

    /// Attaches the block reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the targeted task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the requested action.
    #[must_use]
    pub const fn action(&self) -> TransitionAction {
        self.action
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The targeted task does not exist.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    /// The transition was rejected by the domain state machine.
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// The target status was refused by the active status policy.
    #[error(transparent)]
    Policy(#[from] StatusRejection),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Event log persistence failed.
    #[error(transparent)]
    Events(#[from] EventStoreError),
    /// Daily work-log propagation failed.
    #[error(transparent)]
    DailyLog(#[from] DailyLogError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The sole mutation entry point for task status: loads the aggregate,
/// applies the domain transition, consults the status policy before
/// committing, persists, appends the lifecycle event, and propagates
/// the daily work-log sync.
#[derive(Clone)]
pub struct TaskLifecycleService<R, E, D, P, C>
where
    R: TaskRepository,
    E: EventStore,
    D: DailyLogSync,
    P: StatusPolicy,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    events: Arc<E>,
    daily_log: Arc<D>,
    policy: Arc<P>,
    clock: Arc<C>,
}

impl<R, E, D, P, C> TaskLifecycleService<R, E, D, P, C>
where
    R: TaskRepository,
    E: EventStore,
    D: DailyLogSync,
    P: StatusPolicy,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        events: Arc<E>,
        daily_log: Arc<D>,
        policy: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            events,
            daily_log,
            policy,
            clock,
        }
    }

    /// Creates and stores a new task in To Do.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence
    /// rejects the new task.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let mut task = Task::new(&*self.clock);
        if let Some(due_date) = request.due_date {
            task = task.with_due_date(due_date);
        }
        if request.manual_effort_override.is_some() {
            task.set_manual_effort_override(request.manual_effort_override, &*self.clock);
        }
        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence
    /// lookup fails.
    pub async fn find_task(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Applies a lifecycle transition to a stored task.
    ///
    /// The transition is validated against the task's current status,
    /// then the target status is checked against the status policy
    /// before anything is written; a rejection at either stage leaves
    /// the stored task unmodified and appends no event. At most one
    /// lifecycle event is emitted per successful transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownTask`] when the task does
    /// not exist, [`TaskLifecycleError::Transition`] when the state
    /// machine rejects the action, [`TaskLifecycleError::Policy`] when
    /// the status policy refuses the target status, and persistence
    /// variants when a write fails.
    pub async fn request_transition(&self, request: TransitionRequest) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(request.task_id)
            .await?
            .ok_or(TaskLifecycleError::UnknownTask(request.task_id))?;

        let outcome = task.apply(request.action, request.reason.as_deref(), &*self.clock)?;
        self.policy.check(task.status())?;
        self.repository.update(&task).await?;

        if let Some(kind) = outcome.event() {
            let event = LifecycleEvent::record(task.id(), kind, request.actor, &*self.clock);
            self.events.append(&event).await?;
        }
        if let Some(status) = outcome.daily_sync() {
            self.daily_log.sync_status(task.id(), status).await?;
        }

        tracing::info!(
            task_id = %task.id(),
            action = %outcome.action(),
            from = %outcome.from(),
            to = %outcome.to(),
            "task transition applied"
        );
        Ok(task)
    }

    /// Records or clears the manual effort override on a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownTask`] when the task does
    /// not exist and [`TaskLifecycleError::Repository`] when the write
    /// fails.
    pub async fn record_manual_effort(
        &self,
        task_id: TaskId,
        effort: Option<EffortSeconds>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::UnknownTask(task_id))?;
        task.set_manual_effort_override(effort, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }
}
