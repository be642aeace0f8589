//! Pure metric primitives. No I/O, no clock: callers hand in the records.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, Mood, MoodLog, Priority, Task};

/// Percentage of completed tasks, in `[0, 100]`. The empty collection is
/// defined as 0 rather than NaN; the guard is explicit so a NaN from any
/// other cause would still surface.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Partitions tasks into priority buckets. Every enumerated bucket is
/// present even when empty, and every task lands in exactly one.
pub fn group_by_priority(tasks: &[Task]) -> HashMap<Priority, Vec<&Task>> {
    let mut groups: HashMap<Priority, Vec<&Task>> =
        Priority::ALL.iter().map(|p| (*p, Vec::new())).collect();
    for task in tasks {
        groups.entry(task.priority).or_default().push(task);
    }
    groups
}

/// Partitions tasks into category buckets; same contract as
/// [`group_by_priority`].
pub fn group_by_category(tasks: &[Task]) -> HashMap<Category, Vec<&Task>> {
    let mut groups: HashMap<Category, Vec<&Task>> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
    for task in tasks {
        groups.entry(task.category).or_default().push(task);
    }
    groups
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PriorityBreakdown {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategoryBreakdown {
    pub academic: f64,
    pub personal: f64,
    pub wellness: f64,
    pub work: f64,
    pub other: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub academic: u64,
    pub personal: u64,
    pub wellness: u64,
    pub work: u64,
    pub other: u64,
}

fn rate_of(groups: &HashMap<Priority, Vec<&Task>>, priority: Priority) -> f64 {
    groups
        .get(&priority)
        .map(|bucket| rate_of_refs(bucket))
        .unwrap_or(0.0)
}

fn rate_of_refs(tasks: &[&Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Completion rate per priority bucket; each bucket independent, empty
/// buckets yield 0.
pub fn completion_by_priority(tasks: &[Task]) -> PriorityBreakdown {
    let groups = group_by_priority(tasks);
    PriorityBreakdown {
        high: rate_of(&groups, Priority::High),
        medium: rate_of(&groups, Priority::Medium),
        low: rate_of(&groups, Priority::Low),
    }
}

/// Completion rate per category bucket.
pub fn completion_by_category(tasks: &[Task]) -> CategoryBreakdown {
    let groups = group_by_category(tasks);
    let rate = |category: Category| {
        groups
            .get(&category)
            .map(|bucket| rate_of_refs(bucket))
            .unwrap_or(0.0)
    };
    CategoryBreakdown {
        academic: rate(Category::Academic),
        personal: rate(Category::Personal),
        wellness: rate(Category::Wellness),
        work: rate(Category::Work),
        other: rate(Category::Other),
    }
}

/// Task count per category bucket (the dashboard's byCategory wire shape).
pub fn category_counts(tasks: &[Task]) -> CategoryCounts {
    let groups = group_by_category(tasks);
    let count =
        |category: Category| groups.get(&category).map(|b| b.len() as u64).unwrap_or(0);
    CategoryCounts {
        academic: count(Category::Academic),
        personal: count(Category::Personal),
        wellness: count(Category::Wellness),
        work: count(Category::Work),
        other: count(Category::Other),
    }
}

/// Mean mood as a label. `None` (serialized "N/A") for an empty collection;
/// otherwise the arithmetic mean of ordinals bucketed with closed-lower
/// thresholds, so a boundary mean belongs to the higher band.
pub fn average_mood_label(logs: &[MoodLog]) -> Option<Mood> {
    if logs.is_empty() {
        return None;
    }
    let sum: u32 = logs.iter().map(|l| l.mood.ordinal() as u32).sum();
    let avg = sum as f64 / logs.len() as f64;

    let label = if avg >= 4.5 {
        Mood::Great
    } else if avg >= 3.5 {
        Mood::Good
    } else if avg >= 2.5 {
        Mood::Okay
    } else if avg >= 1.5 {
        Mood::Bad
    } else {
        Mood::Terrible
    };
    Some(label)
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MoodDistribution {
    pub great: u64,
    pub good: u64,
    pub okay: u64,
    pub bad: u64,
    pub terrible: u64,
}

/// Counts per mood label; all five labels present, defaulting to 0.
pub fn mood_distribution(logs: &[MoodLog]) -> MoodDistribution {
    let mut dist = MoodDistribution::default();
    for log in logs {
        match log.mood {
            Mood::Great => dist.great += 1,
            Mood::Good => dist.good += 1,
            Mood::Okay => dist.okay += 1,
            Mood::Bad => dist.bad += 1,
            Mood::Terrible => dist.terrible += 1,
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn task(priority: Priority, category: Category, completed: bool) -> Task {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        Task {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            title: "t".into(),
            due_date: now,
            priority,
            category,
            notes: None,
            completed,
            recurrence: Default::default(),
            created_at: now,
        }
    }

    fn mood(m: Mood) -> MoodLog {
        MoodLog {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            mood: m,
            note: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn completion_rate_empty_is_zero() {
        assert_eq!(completion_rate(&[]), 0.0);
    }

    #[test]
    fn completion_rate_stays_in_bounds() {
        let tasks = vec![
            task(Priority::High, Category::Work, true),
            task(Priority::Low, Category::Work, false),
            task(Priority::Low, Category::Work, true),
        ];
        let rate = completion_rate(&tasks);
        assert!((0.0..=100.0).contains(&rate));
        assert!((rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn every_task_lands_in_exactly_one_bucket() {
        let tasks = vec![
            task(Priority::High, Category::Academic, false),
            task(Priority::Medium, Category::Other, false),
            task(Priority::Medium, Category::Other, true),
        ];
        let groups = group_by_priority(&tasks);
        assert_eq!(groups.len(), 3);
        let total: usize = groups.values().map(|b| b.len()).sum();
        assert_eq!(total, tasks.len());
        assert!(groups[&Priority::Low].is_empty());
    }

    #[test]
    fn empty_work_category_rates_zero_not_error() {
        let tasks = vec![task(Priority::High, Category::Personal, true)];
        let rates = completion_by_category(&tasks);
        assert_eq!(rates.work, 0.0);
        assert_eq!(rates.personal, 100.0);

        let counts = category_counts(&tasks);
        assert_eq!(counts.work, 0);
        assert_eq!(counts.personal, 1);
    }

    #[test]
    fn per_priority_rates_are_independent() {
        let tasks = vec![
            task(Priority::High, Category::Work, true),
            task(Priority::High, Category::Work, true),
            task(Priority::Medium, Category::Work, false),
        ];
        let rates = completion_by_priority(&tasks);
        assert_eq!(rates.high, 100.0);
        assert_eq!(rates.medium, 0.0);
        assert_eq!(rates.low, 0.0);
    }

    #[test]
    fn average_mood_empty_is_none() {
        assert_eq!(average_mood_label(&[]), None);
    }

    #[test]
    fn average_mood_two_great_one_bad_is_good() {
        // ordinals 5, 5, 2 -> mean 4.0
        let logs = vec![mood(Mood::Great), mood(Mood::Great), mood(Mood::Bad)];
        assert_eq!(average_mood_label(&logs), Some(Mood::Good));
    }

    #[test]
    fn average_mood_boundary_goes_to_higher_band() {
        // ordinals 3, 4 -> mean 3.5, exactly on the good threshold
        let logs = vec![mood(Mood::Okay), mood(Mood::Good)];
        assert_eq!(average_mood_label(&logs), Some(Mood::Good));

        // ordinals 4, 5 -> mean 4.5 -> great
        let logs = vec![mood(Mood::Good), mood(Mood::Great)];
        assert_eq!(average_mood_label(&logs), Some(Mood::Great));
    }

    #[test]
    fn average_mood_is_monotone_in_the_mean() {
        let runs = [
            (vec![Mood::Terrible], Mood::Terrible),
            (vec![Mood::Terrible, Mood::Bad], Mood::Bad),
            (vec![Mood::Okay], Mood::Okay),
            (vec![Mood::Okay, Mood::Good], Mood::Good),
            (vec![Mood::Great], Mood::Great),
        ];
        let mut last = 0u8;
        for (moods, expected) in runs {
            let logs: Vec<MoodLog> = moods.into_iter().map(mood).collect();
            let label = average_mood_label(&logs).unwrap();
            assert_eq!(label, expected);
            assert!(label.ordinal() >= last);
            last = label.ordinal();
        }
    }

    #[test]
    fn distribution_counts_every_label() {
        let logs = vec![mood(Mood::Great), mood(Mood::Great), mood(Mood::Bad)];
        let dist = mood_distribution(&logs);
        assert_eq!(dist.great, 2);
        assert_eq!(dist.bad, 1);
        assert_eq!(dist.good, 0);
        assert_eq!(dist.okay, 0);
        assert_eq!(dist.terrible, 0);
    }
}
