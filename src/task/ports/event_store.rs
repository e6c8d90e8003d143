//! Append-only store port for lifecycle events.

use crate::task::domain::{EventId, LifecycleEvent, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event store operations.
pub type EventStoreResult<T> = Result<T, EventStoreError>;

/// Durable, append-only lifecycle event log.
///
/// Events are never mutated or deleted once written; session
/// reconstruction replays the stream returned by
/// [`EventStore::events_for_task`].
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends one event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`EventStoreError::DuplicateEvent`] when an event with
    /// the same identifier was already appended.
    async fn append(&self, event: &LifecycleEvent) -> EventStoreResult<()>;

    /// Returns every event recorded for the task, ordered by
    /// `recorded_at` with the event identifier as tiebreak.
    async fn events_for_task(&self, task_id: TaskId) -> EventStoreResult<Vec<LifecycleEvent>>;
}

/// Errors returned by event store implementations.
#[derive(Debug, Clone, Error)]
pub enum EventStoreError {
    /// An event with the same identifier already exists.
    #[error("duplicate lifecycle event: {0}")]
    DuplicateEvent(EventId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
