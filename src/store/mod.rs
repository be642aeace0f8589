//! Record-store seam. The engine only ever reads records; creation, update
//! and deletion belong to the CRUD layer outside this crate.
//!
//! All time ranges are half-open `[start, end)` over `created_at` unless a
//! method says otherwise. Callers derive the bounds from calendar days; the
//! store does no date arithmetic of its own.

pub mod memory;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Event, MoodLog, Task};

pub use memory::InMemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every task owned by `owner`, any completion state.
    async fn tasks_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Task>>;

    /// Tasks `owner` created within `[start, end)`.
    async fn tasks_created_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>>;

    /// Existence check over task `created_at`.
    async fn task_created_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<bool>;

    /// Mood logs `owner` created within `[start, end)`, ordered by
    /// `created_at` ascending.
    async fn moods_by_owner_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<MoodLog>>;

    /// Existence check over mood-log `created_at`.
    async fn mood_logged_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<bool>;

    async fn journal_count(&self, owner: Uuid) -> StoreResult<u64>;

    async fn journal_count_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<u64>;

    async fn event_count(&self, owner: Uuid) -> StoreResult<u64>;

    /// Events with `date >= from`, ordered by `date` ascending, at most
    /// `limit` of them.
    async fn upcoming_events(
        &self,
        owner: Uuid,
        from: DateTime<Utc>,
        limit: usize,
    ) -> StoreResult<Vec<Event>>;

    /// Events whose `date` falls within `[start, end)`.
    async fn events_by_owner_in_range(
        &self,
        owner: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Event>>;

    /// System-wide: incomplete tasks with `due_date` in `[start, end)`.
    /// Used only by the reminder scheduler.
    async fn open_tasks_due_in_range_all(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Task>>;

    /// System-wide: every known owner id. Used only by the reminder
    /// scheduler to enumerate mood-check candidates.
    async fn owner_ids(&self) -> StoreResult<Vec<Uuid>>;

    /// System-wide: owners with at least one mood log created in
    /// `[start, end)`.
    async fn owners_with_mood_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<HashSet<Uuid>>;
}
