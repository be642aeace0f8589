//! Fixed-time recurring digests. Jobs register a cron expression and a
//! handler; a poll loop fires whichever jobs have an occurrence due since
//! their last run. A job never overlaps itself: if the previous firing is
//! still in flight the tick is skipped, not queued.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::analytics::day_bounds;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::reminders::{Digest, DigestKind, NotificationSink};
use crate::store::RecordStore;

/// A named digest job run by the scheduler. Returns how many digests were
/// emitted.
#[async_trait]
pub trait DigestJob: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, now: DateTime<Utc>) -> EngineResult<usize>;
}

struct JobEntry {
    schedule: cron::Schedule,
    job: Arc<dyn DigestJob>,
    last_run: Option<DateTime<Utc>>,
    in_flight: Arc<AtomicBool>,
}

pub struct ReminderScheduler {
    jobs: Vec<JobEntry>,
    poll_interval: Duration,
}

impl ReminderScheduler {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            jobs: Vec::new(),
            poll_interval,
        }
    }

    /// The two built-in digests, at the times config gives them: task-due in
    /// the morning, mood-check in the evening.
    pub fn with_default_jobs(
        store: Arc<dyn RecordStore>,
        sink: Arc<dyn NotificationSink>,
        config: &EngineConfig,
    ) -> EngineResult<Self> {
        let mut scheduler = Self::new(Duration::from_secs(config.scheduler_poll_secs));
        scheduler.register(
            &config.task_digest_cron,
            Arc::new(TaskDueJob {
                store: Arc::clone(&store),
                sink: Arc::clone(&sink),
            }),
        )?;
        scheduler.register(
            &config.mood_digest_cron,
            Arc::new(MoodCheckJob { store, sink }),
        )?;
        Ok(scheduler)
    }

    pub fn register(&mut self, cron_expr: &str, job: Arc<dyn DigestJob>) -> EngineResult<()> {
        let schedule =
            cron::Schedule::from_str(cron_expr).map_err(|source| EngineError::InvalidSchedule {
                expr: cron_expr.to_string(),
                source,
            })?;
        self.jobs.push(JobEntry {
            schedule,
            job,
            last_run: None,
            in_flight: Arc::new(AtomicBool::new(false)),
        });
        Ok(())
    }

    /// Poll loop. Occurrences before startup are not replayed: each job's
    /// last-run is primed to the loop start.
    pub async fn run(mut self, mut shutdown_rx: tokio::sync::broadcast::Receiver<()>) {
        let started = Utc::now();
        for entry in &mut self.jobs {
            entry.last_run.get_or_insert(started);
        }

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.tick().await; // skip the immediate first tick

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("reminder scheduler shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.tick(Utc::now());
                }
            }
        }
    }

    /// Fire every job with an occurrence due at `now`. Each firing runs on
    /// its own task; the in-flight flag serializes a job against itself.
    fn tick(&mut self, now: DateTime<Utc>) {
        for entry in &mut self.jobs {
            if !is_due(&entry.schedule, entry.last_run, now) {
                continue;
            }
            entry.last_run = Some(now);

            if entry.in_flight.swap(true, Ordering::AcqRel) {
                tracing::warn!(job = entry.job.name(), "previous run still in flight, skipping");
                continue;
            }

            let job = Arc::clone(&entry.job);
            let in_flight = Arc::clone(&entry.in_flight);
            tokio::spawn(async move {
                match job.run(now).await {
                    Ok(sent) => {
                        tracing::info!(job = job.name(), digests = sent, "digest run completed");
                    }
                    Err(e) => {
                        tracing::error!(job = job.name(), error = %e, "digest run failed");
                    }
                }
                in_flight.store(false, Ordering::Release);
            });
        }
    }
}

/// A job is due when its next occurrence after the last run is not in the
/// future. A job that has never run is due immediately.
fn is_due(schedule: &cron::Schedule, last_run: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    let after = last_run.unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap_or(now));
    match schedule.after(&after).next() {
        Some(next) => next <= now,
        None => false,
    }
}

/// Morning digest: one message per owner with incomplete tasks due today or
/// tomorrow.
pub struct TaskDueJob {
    pub store: Arc<dyn RecordStore>,
    pub sink: Arc<dyn NotificationSink>,
}

#[async_trait]
impl DigestJob for TaskDueJob {
    fn name(&self) -> &'static str {
        "task-due-digest"
    }

    async fn run(&self, now: DateTime<Utc>) -> EngineResult<usize> {
        let today = now.date_naive();
        let (scan_start, _) = day_bounds(today);
        // scan covers today and the whole of tomorrow
        let (_, scan_end) = day_bounds(today + chrono::Duration::days(1));

        let due_tasks = self
            .store
            .open_tasks_due_in_range_all(scan_start, scan_end)
            .await?;

        let mut by_owner: HashMap<Uuid, Vec<&crate::models::Task>> = HashMap::new();
        for task in &due_tasks {
            by_owner.entry(task.owner).or_default().push(task);
        }

        let mut sent = 0;
        for (owner, tasks) in by_owner {
            let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
            let digest = Digest {
                owner_id: owner,
                kind: DigestKind::TaskDue,
                payload: serde_json::json!({
                    "dueTasks": tasks.len(),
                    "titles": titles,
                }),
            };
            match self.sink.deliver_digest(digest).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::warn!(owner_id = %owner, error = %e, "task digest delivery failed");
                }
            }
        }
        Ok(sent)
    }
}

/// Evening digest: one reminder per owner with no mood log today.
pub struct MoodCheckJob {
    pub store: Arc<dyn RecordStore>,
    pub sink: Arc<dyn NotificationSink>,
}

#[async_trait]
impl DigestJob for MoodCheckJob {
    fn name(&self) -> &'static str {
        "mood-check-digest"
    }

    async fn run(&self, now: DateTime<Utc>) -> EngineResult<usize> {
        let today = now.date_naive();
        let (day_start, day_end) = day_bounds(today);

        let owners = self.store.owner_ids().await?;
        let logged = self
            .store
            .owners_with_mood_in_range(day_start, day_end)
            .await?;

        let mut sent = 0;
        for owner in owners {
            if logged.contains(&owner) {
                continue;
            }
            let digest = Digest {
                owner_id: owner,
                kind: DigestKind::MoodCheck,
                payload: serde_json::json!({
                    "message": "You haven't logged your mood today",
                }),
            };
            match self.sink.deliver_digest(digest).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::warn!(owner_id = %owner, error = %e, "mood digest delivery failed");
                }
            }
        }
        Ok(sent)
    }
}
