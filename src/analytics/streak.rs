use chrono::NaiveDate;
use uuid::Uuid;

use crate::analytics::day_bounds;
use crate::error::EngineResult;
use crate::store::RecordStore;

/// A streak reports at most one year of consecutive days, even when the true
/// run is longer. Documented ceiling, not an error.
pub const STREAK_CAP: u32 = 365;

/// Consecutive active days ending at `today`, walking backward one day at a
/// time. A day is active when the owner created a task *or* a mood log
/// within it; the first inactive day stops the walk, so a quiet `today`
/// yields 0 regardless of earlier activity.
pub async fn current_streak<S: RecordStore + ?Sized>(
    store: &S,
    owner: Uuid,
    today: NaiveDate,
) -> EngineResult<u32> {
    let mut streak = 0u32;
    let mut cursor = today;

    while streak < STREAK_CAP {
        let (start, end) = day_bounds(cursor);
        let active = store.task_created_in_range(owner, start, end).await?
            || store.mood_logged_in_range(owner, start, end).await?;
        if !active {
            break;
        }
        streak += 1;
        cursor -= chrono::Duration::days(1);
    }

    Ok(streak)
}
