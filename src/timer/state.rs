use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    #[default]
    Countdown,
    Stopwatch,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub mode: TimerMode,
    pub session_id: Option<String>,
    pub book_id: Option<String>,
    pub target_ms: u64,
    pub active_ms: u64,
    pub started_at: Option<DateTime<Utc>>,
    /// Time accumulated from earlier running windows; combines with `running_anchor`
    /// to compute the true active duration.
    #[serde(skip)]
    pub active_ms_baseline: u64,
    #[serde(skip)]
    pub running_anchor: Option<Instant>,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, TimerStatus::Running | TimerStatus::Paused)
    }

    /// Countdown: time left (never negative). Stopwatch: elapsed time.
    pub fn remaining_ms(&self) -> i64 {
        match (self.status, self.mode) {
            (TimerStatus::Idle | TimerStatus::Stopped, _) => 0,
            (TimerStatus::Running | TimerStatus::Paused, TimerMode::Countdown) => {
                let remaining = self.target_ms as i64 - self.current_active_ms() as i64;
                cmp::max(remaining, 0)
            }
            (TimerStatus::Running | TimerStatus::Paused, TimerMode::Stopwatch) => {
                self.current_active_ms() as i64
            }
        }
    }

    pub fn current_active_ms(&self) -> u64 {
        if let (TimerStatus::Running, Some(anchor)) = (self.status, self.running_anchor) {
            self.active_ms_baseline
                .saturating_add(anchor.elapsed().as_millis() as u64)
        } else {
            self.active_ms
        }
    }

    pub fn sync_active_from_anchor(&mut self) {
        if let (TimerStatus::Running, Some(anchor)) = (self.status, self.running_anchor) {
            self.active_ms = self
                .active_ms_baseline
                .saturating_add(anchor.elapsed().as_millis() as u64);
        }
    }

    pub fn begin_session(
        &mut self,
        session_id: String,
        book_id: String,
        target_ms: u64,
        mode: TimerMode,
        start_at: DateTime<Utc>,
        now: Instant,
    ) {
        *self = Self {
            status: TimerStatus::Running,
            mode,
            session_id: Some(session_id),
            book_id: Some(book_id),
            target_ms,
            active_ms: 0,
            started_at: Some(start_at),
            active_ms_baseline: 0,
            running_anchor: Some(now),
        };
    }

    /// Freeze active time; the anchor is dropped so paused time is not counted.
    pub fn pause(&mut self) {
        self.sync_active_from_anchor();
        self.status = TimerStatus::Paused;
        self.running_anchor = None;
        self.active_ms_baseline = self.active_ms;
    }

    pub fn resume(&mut self, now: Instant) {
        self.status = TimerStatus::Running;
        self.active_ms_baseline = self.active_ms;
        self.running_anchor = Some(now);
    }

    pub fn stop(&mut self) {
        self.sync_active_from_anchor();
        self.status = TimerStatus::Stopped;
        self.running_anchor = None;
        self.active_ms_baseline = self.active_ms;
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Stop a running countdown that has reached its target, clamping active
    /// time to the target. Any other state is left untouched.
    pub fn finish_if_elapsed(&mut self) -> bool {
        if self.status != TimerStatus::Running || self.mode != TimerMode::Countdown {
            return false;
        }
        self.sync_active_from_anchor();
        if self.active_ms < self.target_ms {
            return false;
        }
        self.stop();
        self.active_ms = self.active_ms.min(self.target_ms);
        self.active_ms_baseline = self.active_ms;
        true
    }
}
