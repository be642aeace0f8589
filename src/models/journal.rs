use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Journal entries are counted by the analytics layer, never aggregated
/// beyond that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
