use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Pause;

/// How a recorded session ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Completed,
    Cancelled,
}

/// One timed reading session on a single book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
    pub id: String,
    pub book_id: String,
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub target_ms: u64,
    pub active_ms: u64,
    pub paused_ms: u64,
    #[serde(default)]
    pub pauses: Vec<Pause>,
}
