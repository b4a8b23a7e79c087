//! Aggregates for the analytics dashboard.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{ReadingSession, SessionStatus};

/// Reading time spent on one book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopBook {
    pub book_id: String,
    pub active_ms: u64,
    pub session_count: usize,
    /// Share of all completed reading time, in percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStats {
    pub completed_sessions: usize,
    pub cancelled_sessions: usize,
    pub total_active_ms: u64,
    pub total_paused_ms: u64,
    pub average_session_ms: u64,
    pub top_books: Vec<TopBook>,
    /// Days read in a row, counting back from `today` in the caller's offset.
    pub current_streak_days: u32,
}

impl ReadingStats {
    /// Only completed sessions count towards time totals and streaks. Session
    /// start times are bucketed into calendar days at `offset`.
    pub fn from_sessions(
        sessions: &[ReadingSession],
        today: NaiveDate,
        offset: FixedOffset,
        top_n: usize,
    ) -> Self {
        let completed: Vec<&ReadingSession> = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .collect();
        let cancelled_sessions = sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Cancelled)
            .count();

        let total_active_ms: u64 = completed.iter().map(|s| s.active_ms).sum();
        let total_paused_ms: u64 = completed.iter().map(|s| s.paused_ms).sum();
        let average_session_ms = if completed.is_empty() {
            0
        } else {
            total_active_ms / completed.len() as u64
        };

        Self {
            completed_sessions: completed.len(),
            cancelled_sessions,
            total_active_ms,
            total_paused_ms,
            average_session_ms,
            top_books: top_books(&completed, total_active_ms, top_n),
            current_streak_days: current_streak(&completed, today, offset),
        }
    }
}

fn top_books(completed: &[&ReadingSession], total_active_ms: u64, top_n: usize) -> Vec<TopBook> {
    // Keep first-seen order so ties are stable.
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (u64, usize)> = HashMap::new();
    for session in completed {
        let entry = totals.entry(session.book_id.as_str()).or_insert_with(|| {
            order.push(session.book_id.as_str());
            (0, 0)
        });
        entry.0 += session.active_ms;
        entry.1 += 1;
    }

    let mut books: Vec<TopBook> = order
        .into_iter()
        .map(|book_id| {
            let (active_ms, session_count) = totals[book_id];
            let percentage = if total_active_ms == 0 {
                0.0
            } else {
                active_ms as f64 / total_active_ms as f64 * 100.0
            };
            TopBook {
                book_id: book_id.to_string(),
                active_ms,
                session_count,
                percentage,
            }
        })
        .collect();

    books.sort_by(|a, b| b.active_ms.cmp(&a.active_ms));
    books.truncate(top_n);
    books
}

fn current_streak(completed: &[&ReadingSession], today: NaiveDate, offset: FixedOffset) -> u32 {
    let days: BTreeSet<NaiveDate> = completed
        .iter()
        .map(|s| s.started_at.with_timezone(&offset).date_naive())
        .collect();

    // A streak still counts if today's reading hasn't happened yet.
    let mut day = if days.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone, Utc};

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    fn session(book_id: &str, day: u32, active_ms: u64, status: SessionStatus) -> ReadingSession {
        let started_at = Utc.with_ymd_and_hms(2024, 5, day, 21, 0, 0).unwrap();
        ReadingSession {
            id: format!("{book_id}-{day}"),
            book_id: book_id.into(),
            started_at,
            stopped_at: Some(started_at),
            status,
            target_ms: 1_800_000,
            active_ms,
            paused_ms: 1_000,
            pauses: Vec::new(),
        }
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn empty_history() {
        let stats = ReadingStats::from_sessions(&[], may(10), utc(), 3);
        assert_eq!(stats, ReadingStats::default());
    }

    #[test]
    fn totals_and_top_books() {
        let sessions = vec![
            session("demian", 1, 600_000, SessionStatus::Completed),
            session("siddhartha", 2, 300_000, SessionStatus::Completed),
            session("demian", 3, 300_000, SessionStatus::Completed),
            session("steppenwolf", 4, 900_000, SessionStatus::Cancelled),
            session("narziss", 5, 300_000, SessionStatus::Completed),
        ];
        let stats = ReadingStats::from_sessions(&sessions, may(20), utc(), 2);

        assert_eq!(stats.completed_sessions, 4);
        assert_eq!(stats.cancelled_sessions, 1);
        assert_eq!(stats.total_active_ms, 1_500_000);
        assert_eq!(stats.total_paused_ms, 4_000);
        assert_eq!(stats.average_session_ms, 375_000);

        assert_eq!(stats.top_books.len(), 2);
        assert_eq!(stats.top_books[0].book_id, "demian");
        assert_eq!(stats.top_books[0].session_count, 2);
        assert!((stats.top_books[0].percentage - 60.0).abs() < 1e-9);
        // siddhartha and narziss tie; first seen wins.
        assert_eq!(stats.top_books[1].book_id, "siddhartha");
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let sessions = vec![
            session("demian", 6, 1, SessionStatus::Completed),
            session("demian", 8, 1, SessionStatus::Completed),
            session("demian", 9, 1, SessionStatus::Completed),
            session("demian", 9, 1, SessionStatus::Completed),
            session("demian", 10, 1, SessionStatus::Completed),
            session("demian", 7, 1, SessionStatus::Cancelled),
        ];
        assert_eq!(
            ReadingStats::from_sessions(&sessions, may(10), utc(), 3).current_streak_days,
            3
        );
        // Not read yet today: yesterday's streak still stands.
        assert_eq!(
            ReadingStats::from_sessions(&sessions, may(11), utc(), 3).current_streak_days,
            3
        );
        assert_eq!(
            ReadingStats::from_sessions(&sessions, may(12), utc(), 3).current_streak_days,
            0
        );
    }

    #[test]
    fn streak_days_follow_the_reader_offset() {
        let at = |day, hour, minute| {
            let started_at = Utc.with_ymd_and_hms(2024, 5, day, hour, minute, 0).unwrap();
            ReadingSession {
                started_at,
                stopped_at: Some(started_at),
                ..session("demian", day, 1, SessionStatus::Completed)
            }
        };
        // 00:30 and 23:00 on May 10 in Seoul; May 9 and May 10 in UTC.
        let sessions = vec![at(9, 15, 30), at(10, 14, 0)];
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(
            ReadingStats::from_sessions(&sessions, may(10), utc(), 3).current_streak_days,
            2
        );
        assert_eq!(
            ReadingStats::from_sessions(&sessions, may(10), seoul, 3).current_streak_days,
            1
        );
    }
}
