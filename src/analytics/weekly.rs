use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::analytics::day_bounds;
use crate::error::EngineResult;
use crate::store::RecordStore;

pub const WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub date: NaiveDate,
    /// Tasks created that day, not tasks due.
    pub tasks: u64,
    /// Existence flag, not a count.
    pub mood_logged: bool,
}

/// Per-day activity for the fixed week `[window_start, window_start + 7)`.
/// Always exactly 7 entries, oldest first, however sparse the window is.
pub async fn weekly_activity<S: RecordStore + ?Sized>(
    store: &S,
    owner: Uuid,
    window_start: NaiveDate,
) -> EngineResult<Vec<DayActivity>> {
    let mut activity = Vec::with_capacity(WINDOW_DAYS as usize);

    for offset in 0..WINDOW_DAYS {
        let date = window_start + chrono::Duration::days(offset);
        let (start, end) = day_bounds(date);

        let tasks = store.tasks_created_in_range(owner, start, end).await?.len() as u64;
        let mood_logged = store.mood_logged_in_range(owner, start, end).await?;

        activity.push(DayActivity {
            date,
            tasks,
            mood_logged,
        });
    }

    Ok(activity)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::models::{Mood, MoodLog, Task};
    use crate::store::InMemoryStore;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
    }

    fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
    }

    fn task_created(owner: Uuid, created_at: DateTime<Utc>) -> Task {
        Task {
            id: Uuid::new_v4(),
            owner,
            title: "t".into(),
            due_date: created_at,
            priority: Default::default(),
            category: Default::default(),
            notes: None,
            completed: false,
            recurrence: Default::default(),
            created_at,
        }
    }

    #[tokio::test]
    async fn always_seven_entries_oldest_first() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();

        let activity = weekly_activity(&store, owner, start()).await.unwrap();
        assert_eq!(activity.len(), 7);
        for (i, day) in activity.iter().enumerate() {
            assert_eq!(day.date, start() + chrono::Duration::days(i as i64));
            assert_eq!(day.tasks, 0);
            assert!(!day.mood_logged);
        }
    }

    #[tokio::test]
    async fn counts_tasks_and_flags_moods_per_day() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let day2 = start() + chrono::Duration::days(2);

        store.add_task(task_created(owner, at(day2, 8))).await;
        store.add_task(task_created(owner, at(day2, 18))).await;
        store
            .add_mood(MoodLog {
                id: Uuid::new_v4(),
                owner,
                mood: Mood::Good,
                note: None,
                created_at: at(day2, 21),
            })
            .await;
        // mood twice on one day still reads as a single flag
        store
            .add_mood(MoodLog {
                id: Uuid::new_v4(),
                owner,
                mood: Mood::Okay,
                note: None,
                created_at: at(day2, 22),
            })
            .await;

        let activity = weekly_activity(&store, owner, start()).await.unwrap();
        assert_eq!(activity[2].tasks, 2);
        assert!(activity[2].mood_logged);
        assert_eq!(activity[1].tasks, 0);
        assert!(!activity[1].mood_logged);
    }

    #[tokio::test]
    async fn day_boundaries_are_half_open() {
        let store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let day3 = start() + chrono::Duration::days(3);

        // midnight belongs to the day it opens, not the day it closes
        store.add_task(task_created(owner, at(day3, 0))).await;

        let activity = weekly_activity(&store, owner, start()).await.unwrap();
        assert_eq!(activity[2].tasks, 0);
        assert_eq!(activity[3].tasks, 1);
    }
}
