//! In-memory append-only lifecycle event store.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{EventId, LifecycleEvent, TaskId},
    ports::{EventStore, EventStoreError, EventStoreResult},
};

#[derive(Debug, Default)]
struct InMemoryEventState {
    by_task: HashMap<TaskId, Vec<LifecycleEvent>>,
    seen: HashSet<EventId>,
}

/// Thread-safe in-memory lifecycle event store.
///
/// Append-only: the adapter exposes no mutation or removal beyond
/// [`EventStore::append`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    state: Arc<RwLock<InMemoryEventState>>,
}

impl InMemoryEventStore {
    /// Creates an empty in-memory event store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: &LifecycleEvent) -> EventStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| EventStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if !state.seen.insert(event.id()) {
            return Err(EventStoreError::DuplicateEvent(event.id()));
        }
        state
            .by_task
            .entry(event.task_id())
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn events_for_task(&self, task_id: TaskId) -> EventStoreResult<Vec<LifecycleEvent>> {
        let state = self
            .state
            .read()
            .map_err(|err| EventStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut events = state.by_task.get(&task_id).cloned().unwrap_or_default();
        events.sort_by_key(|event| (event.recorded_at(), event.id().into_inner()));
        Ok(events)
    }
}
