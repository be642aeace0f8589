//! Reminder emission: cron-scheduled per-owner digests and the periodic
//! per-record condition checker. This layer decides *that* and *what* to
//! notify; delivery (email, push, in-app) lives behind [`NotificationSink`].

pub mod checker;
pub mod dedup;
pub mod scheduler;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

pub use checker::ReminderChecker;
pub use dedup::{InMemoryMarkerStore, MarkerKey, MarkerStore};
pub use scheduler::{DigestJob, MoodCheckJob, ReminderScheduler, TaskDueJob};

/// One aggregated message per owner per trigger firing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
    pub owner_id: Uuid,
    pub kind: DigestKind,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DigestKind {
    TaskDue,
    MoodCheck,
}

impl DigestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DigestKind::TaskDue => "task-due",
            DigestKind::MoodCheck => "mood-check",
        }
    }
}

/// A single-record notification from the condition checker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub owner_id: Uuid,
    pub record_id: Uuid,
    pub condition: ReminderCondition,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderCondition {
    /// Due within the next hour. Re-fires every check cycle while the
    /// deadline stays inside the window; not date-gated.
    DueSoon,
    /// Due on tomorrow's calendar day. Once per record per day.
    DueTomorrow,
    /// Past due and incomplete. Once per record per day.
    Overdue,
    /// Event scheduled for tomorrow. Once per record per day.
    EventTomorrow,
}

#[derive(Debug, thiserror::Error)]
#[error("delivery failed: {0}")]
pub struct SinkError(#[from] pub anyhow::Error);

/// Delivery collaborator. Failures are logged per message by the callers and
/// never abort a scheduler or checker run.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver_digest(&self, digest: Digest) -> Result<(), SinkError>;

    async fn deliver(&self, notification: Notification) -> Result<(), SinkError>;
}

/// Logs every message through `tracing`, the in-process stand-in until a
/// real transport is wired up.
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn deliver_digest(&self, digest: Digest) -> Result<(), SinkError> {
        tracing::info!(
            owner_id = %digest.owner_id,
            kind = digest.kind.as_str(),
            payload = %digest.payload,
            "digest"
        );
        Ok(())
    }

    async fn deliver(&self, notification: Notification) -> Result<(), SinkError> {
        tracing::info!(
            owner_id = %notification.owner_id,
            record_id = %notification.record_id,
            condition = ?notification.condition,
            title = %notification.title,
            body = %notification.body,
            "reminder"
        );
        Ok(())
    }
}

/// Buffers everything it is handed. Useful in tests and for in-process
/// consumers that drain messages themselves.
#[derive(Debug, Default)]
pub struct CollectingSink {
    digests: tokio::sync::Mutex<Vec<Digest>>,
    notifications: tokio::sync::Mutex<Vec<Notification>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn digests(&self) -> Vec<Digest> {
        self.digests.lock().await.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for CollectingSink {
    async fn deliver_digest(&self, digest: Digest) -> Result<(), SinkError> {
        self.digests.lock().await.push(digest);
        Ok(())
    }

    async fn deliver(&self, notification: Notification) -> Result<(), SinkError> {
        self.notifications.lock().await.push(notification);
        Ok(())
    }
}
