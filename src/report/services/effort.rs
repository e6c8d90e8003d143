//! Port-backed effort reporting service.

use crate::report::domain::EffortReport;
use crate::report::services::SessionReconstructor;
use crate::task::{
    domain::TaskId,
    ports::{EventStore, EventStoreError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for effort reporting.
#[derive(Debug, Error)]
pub enum EffortReportError {
    /// The targeted task does not exist.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    /// Task persistence lookup failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Event log lookup failed.
    #[error(transparent)]
    Events(#[from] EventStoreError),
}

/// Result type for effort reporting operations.
pub type EffortReportResult<T> = Result<T, EffortReportError>;

/// Effort reporting orchestration service.
///
/// Resolves a task and its lifecycle event stream through the ports,
/// injects `now` from the clock, and hands both to the pure
/// reconstruction engine.
#[derive(Clone)]
pub struct EffortReportService<T, E, C>
where
    T: TaskRepository,
    E: EventStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    events: Arc<E>,
    reconstructor: SessionReconstructor,
    clock: Arc<C>,
}

impl<T, E, C> EffortReportService<T, E, C>
where
    T: TaskRepository,
    E: EventStore,
    C: Clock + Send + Sync,
{
    /// Creates a new effort reporting service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        events: Arc<E>,
        reconstructor: SessionReconstructor,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            events,
            reconstructor,
            clock,
        }
    }

    /// Builds the effort report for one task.
    ///
    /// # Errors
    ///
    /// Returns [`EffortReportError::UnknownTask`] when the task does
    /// not exist and persistence variants when a lookup fails.
    pub async fn report_for_task(&self, task_id: TaskId) -> EffortReportResult<EffortReport> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(EffortReportError::UnknownTask(task_id))?;
        let events = self.events.events_for_task(task_id).await?;
        Ok(self
            .reconstructor
            .effort_report(&task, &events, self.clock.utc()))
    }
}
