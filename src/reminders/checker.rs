//! Periodic per-record condition checks for one owner: due-soon,
//! due-tomorrow, overdue, and event-tomorrow. Date-gated conditions go
//! through the marker store; due-soon re-fires every cycle by design.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::analytics::day_bounds;
use crate::error::EngineResult;
use crate::reminders::dedup::MarkerStore;
use crate::reminders::{Notification, NotificationSink, ReminderCondition};
use crate::store::RecordStore;

pub struct ReminderChecker {
    store: Arc<dyn RecordStore>,
    markers: Arc<dyn MarkerStore>,
    sink: Arc<dyn NotificationSink>,
}

impl ReminderChecker {
    pub fn new(
        store: Arc<dyn RecordStore>,
        markers: Arc<dyn MarkerStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            markers,
            sink,
        }
    }

    /// Check loop for one owner. Runs immediately, then every
    /// `check_interval`; a failed cycle is logged and the next one still
    /// happens.
    pub async fn run(
        &self,
        owner: Uuid,
        check_interval: Duration,
        mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
    ) {
        let mut interval = tokio::time::interval(check_interval);
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!(owner_id = %owner, "reminder checker shutting down");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_once(owner, Utc::now()).await {
                        tracing::error!(owner_id = %owner, error = %e, "reminder check failed");
                    }
                }
            }
        }
    }

    /// One evaluation pass against a single captured `now`. Returns how many
    /// notifications were emitted.
    pub async fn run_once(&self, owner: Uuid, now: DateTime<Utc>) -> EngineResult<usize> {
        let today = now.date_naive();
        let tomorrow = today + chrono::Duration::days(1);
        let mut emitted = 0;

        let tasks = self.store.tasks_by_owner(owner).await?;
        for task in tasks.iter().filter(|t| !t.completed) {
            let until_due = task.due_date - now;

            if until_due > chrono::Duration::zero() && until_due <= chrono::Duration::hours(1) {
                emitted += self
                    .emit(Notification {
                        owner_id: owner,
                        record_id: task.id,
                        condition: ReminderCondition::DueSoon,
                        title: "Task due soon".into(),
                        body: format!("\"{}\" is due in less than 1 hour", task.title),
                    })
                    .await;
            }

            if task.due_date.date_naive() == tomorrow
                && self
                    .markers
                    .check_and_mark((task.id, ReminderCondition::DueTomorrow), today)
                    .await?
            {
                emitted += self
                    .emit(Notification {
                        owner_id: owner,
                        record_id: task.id,
                        condition: ReminderCondition::DueTomorrow,
                        title: "Task due tomorrow".into(),
                        body: format!("Don't forget: \"{}\" is due tomorrow", task.title),
                    })
                    .await;
            }

            if task.due_date < now
                && self
                    .markers
                    .check_and_mark((task.id, ReminderCondition::Overdue), today)
                    .await?
            {
                emitted += self
                    .emit(Notification {
                        owner_id: owner,
                        record_id: task.id,
                        condition: ReminderCondition::Overdue,
                        title: "Overdue task".into(),
                        body: format!("\"{}\" is overdue", task.title),
                    })
                    .await;
            }
        }

        let (tomorrow_start, tomorrow_end) = day_bounds(tomorrow);
        let events = self
            .store
            .events_by_owner_in_range(owner, tomorrow_start, tomorrow_end)
            .await?;
        for event in &events {
            if self
                .markers
                .check_and_mark((event.id, ReminderCondition::EventTomorrow), today)
                .await?
            {
                emitted += self
                    .emit(Notification {
                        owner_id: owner,
                        record_id: event.id,
                        condition: ReminderCondition::EventTomorrow,
                        title: "Event tomorrow".into(),
                        body: format!("\"{}\" is scheduled for tomorrow", event.title),
                    })
                    .await;
            }
        }

        Ok(emitted)
    }

    async fn emit(&self, notification: Notification) -> usize {
        match self.sink.deliver(notification.clone()).await {
            Ok(()) => 1,
            Err(e) => {
                tracing::warn!(
                    owner_id = %notification.owner_id,
                    record_id = %notification.record_id,
                    error = %e,
                    "reminder delivery failed"
                );
                0
            }
        }
    }
}
