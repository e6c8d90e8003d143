//! `PostgreSQL` implementation of the append-only event log.

use super::{
    PgPool,
    models::{EventRow, NewEventRow},
    schema::lifecycle_events,
};
use crate::task::{
    domain::{ActorId, EventId, EventKind, LifecycleEvent, PersistedEventData, TaskId},
    ports::{EventStore, EventStoreError, EventStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed lifecycle event store.
///
/// Rows are only ever inserted; there is no update or delete path.
#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a new event store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> EventStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> EventStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(EventStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(EventStoreError::persistence)?
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn append(&self, event: &LifecycleEvent) -> EventStoreResult<()> {
        let event_id = event.id();
        let new_row = to_new_row(event);

        self.run_blocking(move |connection| {
            diesel::insert_into(lifecycle_events::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        EventStoreError::DuplicateEvent(event_id)
                    }
                    _ => EventStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn events_for_task(&self, task_id: TaskId) -> EventStoreResult<Vec<LifecycleEvent>> {
        self.run_blocking(move |connection| {
            let rows = lifecycle_events::table
                .filter(lifecycle_events::task_id.eq(task_id.into_inner()))
                .order((
                    lifecycle_events::recorded_at.asc(),
                    lifecycle_events::id.asc(),
                ))
                .select(EventRow::as_select())
                .load::<EventRow>(connection)
                .map_err(EventStoreError::persistence)?;
            rows.into_iter().map(row_to_event).collect()
        })
        .await
    }
}

fn to_new_row(event: &LifecycleEvent) -> NewEventRow {
    NewEventRow {
        id: event.id().into_inner(),
        task_id: event.task_id().into_inner(),
        kind: event.kind().as_str().to_owned(),
        recorded_at: event.recorded_at(),
        actor_id: event.actor().into_inner(),
    }
}

fn row_to_event(row: EventRow) -> EventStoreResult<LifecycleEvent> {
    let kind = EventKind::try_from(row.kind.as_str()).map_err(EventStoreError::persistence)?;
    Ok(LifecycleEvent::from_persisted(PersistedEventData {
        id: EventId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        kind,
        recorded_at: row.recorded_at,
        actor: ActorId::from_uuid(row.actor_id),
    }))
}
