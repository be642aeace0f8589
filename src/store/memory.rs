//! In-memory record store for tests and single-process embeddings. For
//! anything multi-instance, back the `RecordStore` trait with a real
//! database instead.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Event, JournalEntry, MoodLog, Task};
use crate::store::{RecordStore, StoreResult};

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Records>,
}

#[derive(Default)]
struct Records {
    tasks: Vec<Task>,
    moods: Vec<MoodLog>,
    journals: Vec<JournalEntry>,
    events: Vec<Event>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_task(&self, task: Task) {
        self.inner.write().await.tasks.push(task);
    }

    pub async fn add_mood(&self, log: MoodLog) {
        self.inner.write().await.moods.push(log);
    }

    pub async fn add_journal(&self, entry: JournalEntry) {
        self.inner.write().await.journals.push(entry);
    }

    pub async fn add_event(&self, event: Event) {
        self.inner.write().await.events.push(event);
    }
}

fn in_range(ts: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    ts >= start && ts < end
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn tasks_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Task>> {
        let records = self.inner.read().await;
        Ok(records
            .tasks
            .iter()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect())
    }

    async fn tasks_created_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>> {
        let records = self.inner.read().await;
        Ok(records
            .tasks
            .iter()
            .filter(|t| t.owner == owner && in_range(t.created_at, start, end))
            .cloned()
            .collect())
    }

    async fn task_created_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let records = self.inner.read().await;
        Ok(records
            .tasks
            .iter()
            .any(|t| t.owner == owner && in_range(t.created_at, start, end)))
    }

    async fn moods_by_owner_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MoodLog>> {
        let records = self.inner.read().await;
        let mut logs: Vec<MoodLog> = records
            .moods
            .iter()
            .filter(|m| m.owner == owner && in_range(m.created_at, start, end))
            .cloned()
            .collect();
        logs.sort_by_key(|m| m.created_at);
        Ok(logs)
    }

    async fn mood_logged_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let records = self.inner.read().await;
        Ok(records
            .moods
            .iter()
            .any(|m| m.owner == owner && in_range(m.created_at, start, end)))
    }

    async fn journal_count(&self, owner: Uuid) -> StoreResult<u64> {
        let records = self.inner.read().await;
        Ok(records.journals.iter().filter(|j| j.owner == owner).count() as u64)
    }

    async fn journal_count_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let records = self.inner.read().await;
        Ok(records
            .journals
            .iter()
            .filter(|j| j.owner == owner && in_range(j.created_at, start, end))
            .count() as u64)
    }

    async fn event_count(&self, owner: Uuid) -> StoreResult<u64> {
        let records = self.inner.read().await;
        Ok(records.events.iter().filter(|e| e.owner == owner).count() as u64)
    }

    async fn upcoming_events(
        &self,
        owner: Uuid,
        from: DateTime<Utc>,
        limit: usize,
    ) -> StoreResult<Vec<Event>> {
        let records = self.inner.read().await;
        let mut events: Vec<Event> = records
            .events
            .iter()
            .filter(|e| e.owner == owner && e.date >= from)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        events.truncate(limit);
        Ok(events)
    }

    async fn events_by_owner_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Event>> {
        let records = self.inner.read().await;
        Ok(records
            .events
            .iter()
            .filter(|e| e.owner == owner && in_range(e.date, start, end))
            .cloned()
            .collect())
    }

    async fn open_tasks_due_in_range_all(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>> {
        let records = self.inner.read().await;
        Ok(records
            .tasks
            .iter()
            .filter(|t| !t.completed && in_range(t.due_date, start, end))
            .cloned()
            .collect())
    }

    async fn owner_ids(&self) -> StoreResult<Vec<Uuid>> {
        let records = self.inner.read().await;
        let mut seen = HashSet::new();
        let mut owners = Vec::new();
        for owner in records
            .tasks
            .iter()
            .map(|t| t.owner)
            .chain(records.moods.iter().map(|m| m.owner))
            .chain(records.journals.iter().map(|j| j.owner))
            .chain(records.events.iter().map(|e| e.owner))
        {
            if seen.insert(owner) {
                owners.push(owner);
            }
        }
        Ok(owners)
    }

    async fn owners_with_mood_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<HashSet<Uuid>> {
        let records = self.inner.read().await;
        Ok(records
            .moods
            .iter()
            .filter(|m| in_range(m.created_at, start, end))
            .map(|m| m.owner)
            .collect())
    }
}
