//! # daytrack-core
//!
//! Activity aggregation and reminder-scheduling engine for the DayTrack
//! personal tracker. Raw timestamped records (tasks, mood logs, journal
//! entries, calendar events) go in through the [`store::RecordStore`] seam;
//! out come a consolidated analytics snapshot and time-triggered reminders.
//!
//! ## Modules
//!
//! - [`models`] — record types and their enumerations
//! - [`store`] — the read-only record-store seam plus an in-memory impl
//! - [`analytics`] — snapshot builder, streak, weekly activity, metric
//!   primitives
//! - [`reminders`] — cron digests, per-record condition checks, dedup
//!   markers, and the delivery seam
//! - [`config`] — env-driven engine settings
//! - [`error`] — error types
//!
//! Persistence backends, identity, HTTP, and message transport all live
//! outside this crate.

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod reminders;
pub mod store;

// Re-exports for convenience.
pub use analytics::{build_snapshot, current_streak, weekly_activity, DashboardSnapshot};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use models::{Event, JournalEntry, Mood, MoodLog, Task};
pub use reminders::{
    Digest, DigestKind, InMemoryMarkerStore, MarkerStore, Notification, NotificationSink,
    ReminderChecker, ReminderCondition, ReminderScheduler,
};
pub use store::{InMemoryStore, RecordStore, StoreError};
