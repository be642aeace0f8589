use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    /// Fixed due instant. Recurrence fields describe future generation and
    /// are never expanded here.
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Academic,
    Personal,
    Wellness,
    Work,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Academic,
        Category::Personal,
        Category::Wellness,
        Category::Work,
        Category::Other,
    ];
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recurrence {
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub pattern: RecurrencePattern,
    /// Every N days/weeks/months. Always >= 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    pub end_date: Option<DateTime<Utc>>,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self {
            is_recurring: false,
            pattern: RecurrencePattern::None,
            interval: 1,
            end_date: None,
        }
    }
}

fn default_interval() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    None,
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl Default for RecurrencePattern {
    fn default() -> Self {
        Self::None
    }
}
