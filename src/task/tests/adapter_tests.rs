//! Behavioural tests for the in-memory adapters.

use crate::task::{
    adapters::memory::{InMemoryEventStore, InMemoryTaskRepository},
    domain::{ActorId, EventKind, LifecycleEvent, Task, TaskStatus, TransitionAction},
    ports::{EventStore, EventStoreError, TaskRepository, TaskRepositoryError},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_task_ids() {
    let repository = InMemoryTaskRepository::new();
    let task = Task::new(&DefaultClock);
    repository.store(&task).await.expect("store should succeed");

    let result = repository.store(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_unknown_tasks() {
    let repository = InMemoryTaskRepository::new();
    let task = Task::new(&DefaultClock);

    let result = repository.update(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_status_returns_only_matching_tasks() {
    let clock = DefaultClock;
    let repository = InMemoryTaskRepository::new();
    let waiting = Task::new(&clock);
    let mut running = Task::new(&clock);
    running
        .apply(TransitionAction::Start, None, &clock)
        .expect("start should succeed");
    repository
        .store(&waiting)
        .await
        .expect("store should succeed");
    repository
        .store(&running)
        .await
        .expect("store should succeed");

    let to_do = repository
        .find_by_status(TaskStatus::ToDo)
        .await
        .expect("lookup should succeed");
    let in_progress = repository
        .find_by_status(TaskStatus::InProgress)
        .await
        .expect("lookup should succeed");

    assert_eq!(to_do, vec![waiting]);
    assert_eq!(in_progress, vec![running]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn event_store_rejects_duplicate_event_ids() {
    let store = InMemoryEventStore::new();
    let task = Task::new(&DefaultClock);
    let event = LifecycleEvent::record(task.id(), EventKind::Started, ActorId::new(), &DefaultClock);
    store.append(&event).await.expect("append should succeed");

    let result = store.append(&event).await;

    assert!(matches!(
        result,
        Err(EventStoreError::DuplicateEvent(id)) if id == event.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn events_come_back_in_recorded_order() {
    let clock = DefaultClock;
    let store = InMemoryEventStore::new();
    let task = Task::new(&clock);
    let actor = ActorId::new();
    let kinds = [EventKind::Started, EventKind::Paused, EventKind::Resumed];
    for kind in kinds {
        let event = LifecycleEvent::record(task.id(), kind, actor, &clock);
        store.append(&event).await.expect("append should succeed");
    }

    let replayed = store
        .events_for_task(task.id())
        .await
        .expect("lookup should succeed");

    let replayed_kinds: Vec<EventKind> = replayed.iter().map(LifecycleEvent::kind).collect();
    assert_eq!(replayed_kinds, kinds.to_vec());
}
