//! Service orchestration tests for lifecycle transitions.

use std::sync::Arc;

use crate::task::{
    adapters::memory::{InMemoryDailyLog, InMemoryEventStore, InMemoryTaskRepository},
    domain::{
        ActorId, DailyTaskStatus, EffortSeconds, EventKind, TaskId, TaskStatus, TransitionAction,
        TransitionError,
    },
    ports::{EventStore, StatusPolicy, StatusRejection, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, TransitionRequest},
    validation::{AllowAllStatuses, EnabledStatusSet},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService<P> = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryEventStore,
    InMemoryDailyLog,
    P,
    DefaultClock,
>;

struct Harness<P: StatusPolicy> {
    service: TestService<P>,
    repository: Arc<InMemoryTaskRepository>,
    events: Arc<InMemoryEventStore>,
    daily_log: Arc<InMemoryDailyLog>,
}

fn harness_with_policy<P: StatusPolicy>(policy: P) -> Harness<P> {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let events = Arc::new(InMemoryEventStore::new());
    let daily_log = Arc::new(InMemoryDailyLog::new());
    let service = TaskLifecycleService::new(
        Arc::clone(&repository),
        Arc::clone(&events),
        Arc::clone(&daily_log),
        Arc::new(policy),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        repository,
        events,
        daily_log,
    }
}

#[fixture]
fn harness() -> Harness<AllowAllStatuses> {
    harness_with_policy(AllowAllStatuses)
}

#[fixture]
fn actor() -> ActorId {
    ActorId::new()
}

mockall::mock! {
    pub Policy {}

    impl StatusPolicy for Policy {
        fn check(&self, status: TaskStatus) -> Result<(), StatusRejection>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_persists_and_is_retrievable(harness: Harness<AllowAllStatuses>) {
    let created = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");

    let fetched = harness
        .service
        .find_task(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(created));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_carries_due_date_and_override(harness: Harness<AllowAllStatuses>) {
    let due_date = chrono::NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
    let effort = EffortSeconds::new(1800).expect("valid effort");

    let created = harness
        .service
        .create_task(
            CreateTaskRequest::new()
                .with_due_date(due_date)
                .with_manual_effort_override(effort),
        )
        .await
        .expect("task creation should succeed");

    assert_eq!(created.status(), TaskStatus::ToDo);
    assert_eq!(created.due_date(), Some(due_date));
    assert_eq!(created.manual_effort_override(), Some(effort));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn block_and_unblock_round_trip_through_the_service(
    harness: Harness<AllowAllStatuses>,
    actor: ActorId,
) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");
    harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Start,
            actor,
        ))
        .await
        .expect("start should succeed");

    let blocked = harness
        .service
        .request_transition(
            TransitionRequest::new(task.id(), TransitionAction::Block, actor)
                .with_reason("waiting on client sign-off"),
        )
        .await
        .expect("block should succeed");
    assert_eq!(blocked.status(), TaskStatus::Blocked);
    assert_eq!(blocked.block_reason(), Some("waiting on client sign-off"));

    let unblocked = harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Unblock,
            actor,
        ))
        .await
        .expect("unblock should succeed");
    assert_eq!(unblocked.status(), TaskStatus::InProgress);
    assert!(unblocked.block_reason().is_none());

    // Neither block nor unblock feeds the session stream.
    let events = harness
        .events
        .events_for_task(task.id())
        .await
        .expect("event lookup should succeed");
    assert_eq!(events.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_transitions_and_appends_started_event(
    harness: Harness<AllowAllStatuses>,
    actor: ActorId,
) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");

    let updated = harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Start,
            actor,
        ))
        .await
        .expect("start should succeed");

    assert_eq!(updated.status(), TaskStatus::InProgress);
    let events = harness
        .events
        .events_for_task(task.id())
        .await
        .expect("event lookup should succeed");
    assert_eq!(events.len(), 1);
    let event = events.first().expect("one event should be recorded");
    assert_eq!(event.kind(), EventKind::Started);
    assert_eq!(event.actor(), actor);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_from_paused_appends_resumed_event(
    harness: Harness<AllowAllStatuses>,
    actor: ActorId,
) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");
    for action in [TransitionAction::Start, TransitionAction::Pause] {
        harness
            .service
            .request_transition(TransitionRequest::new(task.id(), action, actor))
            .await
            .expect("transition should succeed");
    }

    harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Start,
            actor,
        ))
        .await
        .expect("restart should succeed");

    let events = harness
        .events
        .events_for_task(task.id())
        .await
        .expect("event lookup should succeed");
    let kinds: Vec<EventKind> = events.iter().map(|event| event.kind()).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Started, EventKind::Paused, EventKind::Resumed]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_marks_daily_log_completed(harness: Harness<AllowAllStatuses>, actor: ActorId) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");
    for action in [TransitionAction::Start, TransitionAction::Complete] {
        harness
            .service
            .request_transition(TransitionRequest::new(task.id(), action, actor))
            .await
            .expect("transition should succeed");
    }

    let synced = harness
        .daily_log
        .status_for(task.id())
        .expect("daily log lookup should succeed");
    assert_eq!(synced, Some(DailyTaskStatus::Completed));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revise_marks_daily_log_pending_again(harness: Harness<AllowAllStatuses>, actor: ActorId) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");
    for action in [
        TransitionAction::Start,
        TransitionAction::Complete,
        TransitionAction::Revise,
    ] {
        harness
            .service
            .request_transition(TransitionRequest::new(task.id(), action, actor))
            .await
            .expect("transition should succeed");
    }

    let synced = harness
        .daily_log
        .status_for(task.id())
        .expect("daily log lookup should succeed");
    assert_eq!(synced, Some(DailyTaskStatus::Pending));

    let stored = harness
        .service
        .find_task(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::ToDo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn block_without_reason_leaves_stored_task_unchanged(
    harness: Harness<AllowAllStatuses>,
    actor: ActorId,
) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");

    let result = harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Block,
            actor,
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Transition(
            TransitionError::MissingReason
        ))
    ));
    let stored = harness
        .service
        .find_task(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn illegal_transition_is_surfaced_with_context(
    harness: Harness<AllowAllStatuses>,
    actor: ActorId,
) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");

    let result = harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Complete,
            actor,
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Transition(
            TransitionError::IllegalTransition {
                action: TransitionAction::Complete,
                status: TaskStatus::ToDo,
            }
        ))
    ));
    let events = harness
        .events
        .events_for_task(task.id())
        .await
        .expect("event lookup should succeed");
    assert!(events.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn restricted_status_set_rejects_before_committing(actor: ActorId) {
    // InProgress is disabled: starting any task must be refused.
    let policy = EnabledStatusSet::from_statuses([
        TaskStatus::ToDo,
        TaskStatus::Done,
        TaskStatus::Archived,
    ]);
    let harness = harness_with_policy(policy);
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");

    let result = harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Start,
            actor,
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Policy(StatusRejection {
            status: TaskStatus::InProgress,
            ..
        }))
    ));
    let stored = harness
        .repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::ToDo);
    let events = harness
        .events
        .events_for_task(task.id())
        .await
        .expect("event lookup should succeed");
    assert!(events.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_policy_is_consulted_with_the_target_status(actor: ActorId) {
    let mut policy = MockPolicy::new();
    policy
        .expect_check()
        .withf(|status| *status == TaskStatus::InProgress)
        .times(1)
        .returning(|_| Ok(()));
    let harness = harness_with_policy(policy);
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");

    harness
        .service
        .request_transition(TransitionRequest::new(
            task.id(),
            TransitionAction::Start,
            actor,
        ))
        .await
        .expect("start should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_on_unknown_task_is_rejected(harness: Harness<AllowAllStatuses>, actor: ActorId) {
    let missing = TaskId::new();

    let result = harness
        .service
        .request_transition(TransitionRequest::new(missing, TransitionAction::Start, actor))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::UnknownTask(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_manual_effort_persists_the_override(harness: Harness<AllowAllStatuses>) {
    let task = harness
        .service
        .create_task(CreateTaskRequest::new())
        .await
        .expect("task creation should succeed");
    let effort = EffortSeconds::new(5400).expect("valid effort");

    harness
        .service
        .record_manual_effort(task.id(), Some(effort))
        .await
        .expect("override should be recorded");

    let stored = harness
        .service
        .find_task(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.manual_effort_override(), Some(effort));
}
