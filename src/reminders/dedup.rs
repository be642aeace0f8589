//! Per-(record, condition) notification markers. The marker remembers the
//! last calendar date a pair was notified; `check_and_mark` does the compare
//! and the overwrite under one lock, so two same-day evaluations cannot both
//! win the race.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::reminders::ReminderCondition;
use crate::store::StoreResult;

pub type MarkerKey = (Uuid, ReminderCondition);

#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Returns `true` and records today's date if `key` has not yet been
    /// notified on `today`; returns `false` (suppress) otherwise.
    async fn check_and_mark(&self, key: MarkerKey, today: NaiveDate) -> StoreResult<bool>;
}

/// In-memory marker store scoped to one process/session.
#[derive(Debug, Default)]
pub struct InMemoryMarkerStore {
    markers: Mutex<HashMap<MarkerKey, NaiveDate>>,
}

impl InMemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarkerStore for InMemoryMarkerStore {
    async fn check_and_mark(&self, key: MarkerKey, today: NaiveDate) -> StoreResult<bool> {
        let mut markers = self.markers.lock().await;
        match markers.get(&key) {
            Some(last) if *last == today => Ok(false),
            _ => {
                markers.insert(key, today);
                Ok(true)
            }
        }
    }
}
