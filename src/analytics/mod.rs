//! Derived metrics: snapshot, streak, weekly activity, and the pure metric
//! primitives they are built from.

pub mod metrics;
pub mod snapshot;
pub mod streak;
pub mod weekly;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub use snapshot::{build_snapshot, DashboardSnapshot};
pub use streak::{current_streak, STREAK_CAP};
pub use weekly::{weekly_activity, DayActivity};

/// Half-open instant bounds `[midnight, next midnight)` for a calendar day.
/// Day boundaries are derived naively from the stored instant, matching the
/// tracker's timezone-naive date arithmetic.
pub(crate) fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = (date + chrono::Duration::days(1))
        .and_time(NaiveTime::MIN)
        .and_utc();
    (start, end)
}
