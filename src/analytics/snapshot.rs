//! The dashboard snapshot: one owner, one reference instant, one consistent
//! report. Field names are part of the wire contract consumed by the UI.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::analytics::day_bounds;
use crate::analytics::metrics::{
    average_mood_label, category_counts, completion_by_priority, completion_rate,
    mood_distribution, CategoryCounts, MoodDistribution, PriorityBreakdown,
};
use crate::analytics::streak::current_streak;
use crate::analytics::weekly::{weekly_activity, DayActivity};
use crate::error::EngineResult;
use crate::models::{Event, Mood};
use crate::store::RecordStore;

pub const UPCOMING_EVENTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub tasks: TaskSummary,
    pub mood: MoodSummary,
    pub journal: JournalSummary,
    pub events: EventSummary,
    pub productivity: ProductivitySummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: u64,
    pub completed: u64,
    pub overdue: u64,
    pub today: u64,
    pub completion_rate: f64,
    pub by_priority: PriorityBreakdown,
    pub by_category: CategoryCounts,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSummary {
    pub recent_logs: u64,
    pub trend: Vec<MoodPoint>,
    pub distribution: MoodDistribution,
    #[serde(serialize_with = "serialize_average_mood")]
    pub average_mood: Option<Mood>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub mood: Mood,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSummary {
    pub total: u64,
    pub this_week: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub total: u64,
    pub upcoming: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivitySummary {
    pub streak: u32,
    pub weekly_activity: Vec<DayActivity>,
}

/// The "N/A" sentinel for an owner with no mood logs in the window.
fn serialize_average_mood<S: Serializer>(
    mood: &Option<Mood>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match mood {
        Some(m) => serializer.serialize_str(m.label()),
        None => serializer.serialize_str("N/A"),
    }
}

/// Builds the complete snapshot for one owner against one reference
/// instant. `now` is captured by the caller and threaded through every
/// sub-computation, so the report is internally consistent: no read
/// re-fetches a fresher clock partway through. Independent store reads run
/// concurrently; any failure aborts the whole snapshot.
pub async fn build_snapshot<S: RecordStore + ?Sized>(
    store: &S,
    owner: Uuid,
    now: DateTime<Utc>,
) -> EngineResult<DashboardSnapshot> {
    let today = now.date_naive();
    let (today_start, today_end) = day_bounds(today);
    let week_start = today - chrono::Duration::days(7);
    let (week_start_ts, _) = day_bounds(week_start);

    let (all_tasks, recent_moods, journal_total, journal_week, event_total, upcoming) =
        tokio::try_join!(
            store.tasks_by_owner(owner),
            store.moods_by_owner_in_range(owner, week_start_ts, today_end),
            store.journal_count(owner),
            store.journal_count_in_range(owner, week_start_ts, today_end),
            store.event_count(owner),
            store.upcoming_events(owner, today_start, UPCOMING_EVENTS_LIMIT),
        )?;

    let (streak, activity) = tokio::try_join!(
        current_streak(store, owner, today),
        weekly_activity(store, owner, week_start),
    )?;

    let completed = all_tasks.iter().filter(|t| t.completed).count() as u64;
    let overdue = all_tasks
        .iter()
        .filter(|t| !t.completed && t.due_date < today_start)
        .count() as u64;
    let due_today = all_tasks
        .iter()
        .filter(|t| t.due_date.date_naive() == today)
        .count() as u64;

    let trend = recent_moods
        .iter()
        .map(|m| MoodPoint {
            date: m.created_at.date_naive(),
            mood: m.mood,
        })
        .collect();

    Ok(DashboardSnapshot {
        tasks: TaskSummary {
            total: all_tasks.len() as u64,
            completed,
            overdue,
            today: due_today,
            completion_rate: completion_rate(&all_tasks),
            by_priority: completion_by_priority(&all_tasks),
            by_category: category_counts(&all_tasks),
        },
        mood: MoodSummary {
            recent_logs: recent_moods.len() as u64,
            trend,
            distribution: mood_distribution(&recent_moods),
            average_mood: average_mood_label(&recent_moods),
        },
        journal: JournalSummary {
            total: journal_total,
            this_week: journal_week,
        },
        events: EventSummary {
            total: event_total,
            upcoming,
        },
        productivity: ProductivitySummary {
            streak,
            weekly_activity: activity,
        },
    })
}
