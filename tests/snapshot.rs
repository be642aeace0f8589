//! End-to-end snapshot behavior over the in-memory store, including the
//! fail-as-a-unit contract when the store is unreachable.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use daytrack_core::analytics::build_snapshot;
use daytrack_core::models::{Category, Event, Mood, MoodLog, Priority, Task};
use daytrack_core::store::{InMemoryStore, RecordStore, StoreError, StoreResult};
use daytrack_core::EngineError;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap()
}

fn task(owner: Uuid, due: DateTime<Utc>, priority: Priority, category: Category, completed: bool) -> Task {
    Task {
        id: Uuid::new_v4(),
        owner,
        title: "task".into(),
        due_date: due,
        priority,
        category,
        notes: None,
        completed,
        recurrence: Default::default(),
        created_at: now() - chrono::Duration::days(1),
    }
}

#[tokio::test]
async fn snapshot_over_a_lived_in_week() {
    let store = InMemoryStore::new();
    let owner = Uuid::new_v4();

    store
        .add_task(task(owner, now() - chrono::Duration::days(2), Priority::High, Category::Work, true))
        .await;
    store
        .add_task(task(owner, now() - chrono::Duration::days(1), Priority::High, Category::Work, false))
        .await;
    store
        .add_task(task(owner, now() + chrono::Duration::hours(4), Priority::Low, Category::Personal, false))
        .await;

    for (back, mood) in [(3i64, Mood::Great), (2, Mood::Great), (1, Mood::Bad)] {
        store
            .add_mood(MoodLog {
                id: Uuid::new_v4(),
                owner,
                mood,
                note: None,
                created_at: now() - chrono::Duration::days(back),
            })
            .await;
    }

    for ahead in 1..=7 {
        store
            .add_event(Event {
                id: Uuid::new_v4(),
                owner,
                title: format!("event +{ahead}"),
                date: now() + chrono::Duration::days(ahead),
                notes: None,
                created_at: now() - chrono::Duration::days(10),
            })
            .await;
    }

    let snapshot = build_snapshot(&store, owner, now()).await.unwrap();

    assert_eq!(snapshot.tasks.total, 3);
    assert_eq!(snapshot.tasks.overdue, 1);
    assert_eq!(snapshot.tasks.today, 1);
    assert_eq!(snapshot.tasks.by_category.work, 2);
    assert_eq!(snapshot.tasks.by_category.personal, 1);
    assert_eq!(snapshot.tasks.by_priority.high, 50.0);
    assert_eq!(snapshot.tasks.by_priority.low, 0.0);

    // ordinals 5, 5, 2 -> mean 4.0 -> good
    assert_eq!(snapshot.mood.average_mood, Some(Mood::Good));
    assert_eq!(snapshot.mood.recent_logs, 3);

    assert_eq!(snapshot.events.total, 7);
    assert_eq!(snapshot.events.upcoming.len(), 5);
    let dates: Vec<_> = snapshot.events.upcoming.iter().map(|e| e.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    assert_eq!(snapshot.productivity.weekly_activity.len(), 7);
}

#[tokio::test]
async fn snapshot_never_mixes_owners() {
    let store = InMemoryStore::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    store
        .add_task(task(stranger, now(), Priority::High, Category::Work, true))
        .await;
    store
        .add_mood(MoodLog {
            id: Uuid::new_v4(),
            owner: stranger,
            mood: Mood::Great,
            note: None,
            created_at: now(),
        })
        .await;

    let snapshot = build_snapshot(&store, owner, now()).await.unwrap();
    assert_eq!(snapshot.tasks.total, 0);
    assert_eq!(snapshot.mood.recent_logs, 0);
    assert_eq!(snapshot.productivity.streak, 0);
}

/// A store whose every query fails, standing in for an unreachable backend.
struct UnreachableStore;

#[async_trait]
impl RecordStore for UnreachableStore {
    async fn tasks_by_owner(&self, _owner: Uuid) -> StoreResult<Vec<Task>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn tasks_created_in_range(
        &self,
        _owner: Uuid,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn task_created_in_range(
        &self,
        _owner: Uuid,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<bool> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn moods_by_owner_in_range(
        &self,
        _owner: Uuid,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<Vec<MoodLog>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn mood_logged_in_range(
        &self,
        _owner: Uuid,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<bool> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn journal_count(&self, _owner: Uuid) -> StoreResult<u64> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn journal_count_in_range(
        &self,
        _owner: Uuid,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<u64> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn event_count(&self, _owner: Uuid) -> StoreResult<u64> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn upcoming_events(
        &self,
        _owner: Uuid,
        _from: DateTime<Utc>,
        _limit: usize,
    ) -> StoreResult<Vec<Event>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn events_by_owner_in_range(
        &self,
        _owner: Uuid,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<Vec<Event>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn open_tasks_due_in_range_all(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn owner_ids(&self) -> StoreResult<Vec<Uuid>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn owners_with_mood_in_range(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> StoreResult<HashSet<Uuid>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn unreachable_store_fails_the_snapshot_as_a_unit() {
    let err = build_snapshot(&UnreachableStore, Uuid::new_v4(), now())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Store(StoreError::Unavailable(_))));
}
