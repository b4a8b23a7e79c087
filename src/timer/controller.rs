use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use serde::Serialize;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    log_info,
    models::{Pause, ReadingSession, SessionStatus},
    settings::TimerSettings,
};

use super::{TimerMode, TimerState, TimerStatus};

const ENABLE_LOGS: bool = true;
const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_ms: i64,
}

/// Notifications for whatever view is showing the timer.
#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimerEvent {
    StateChanged {
        state: TimerState,
        remaining_ms: i64,
    },
    Heartbeat {
        state: TimerState,
        active_ms: u64,
        remaining_ms: i64,
    },
    SessionCompleted {
        session: ReadingSession,
    },
}

/// Running ticker task. Dropping it stops the task.
struct Ticker {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        self.handle.abort();
    }
}

/// Tick cadence for the next ticker that gets spawned.
#[derive(Debug, Clone, Copy)]
struct TickConfig {
    tick_interval: Duration,
    heartbeat_every_ticks: u32,
}

impl TickConfig {
    fn from_settings(settings: &TimerSettings, debug_mode: bool) -> Self {
        Self {
            tick_interval: Duration::from_millis(settings.tick_interval_ms.max(1)),
            heartbeat_every_ticks: if debug_mode {
                1
            } else {
                settings.heartbeat_every_ticks.max(1)
            },
        }
    }
}

/// Pauses recorded for the current session.
#[derive(Default)]
struct PauseLog {
    pauses: Vec<Pause>,
    open_since: Option<Instant>,
    paused_ms: u64,
}

impl PauseLog {
    fn open(&mut self, session_id: &str, now: Instant) {
        self.open_since = Some(now);
        self.pauses.push(Pause {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            pause_started_at: Utc::now(),
            pause_ended_at: None,
            duration_ms: None,
        });
    }

    fn close(&mut self, now: Instant) {
        let Some(since) = self.open_since.take() else {
            return;
        };
        let duration_ms = now.saturating_duration_since(since).as_millis() as u64;
        self.paused_ms = self.paused_ms.saturating_add(duration_ms);
        if let Some(pause) = self.pauses.last_mut().filter(|pause| pause.is_open()) {
            pause.pause_ended_at = Some(Utc::now());
            pause.duration_ms = Some(duration_ms);
        }
    }
}

/// Handle to the reading timer. Clones share one timer.
///
/// The ticker task lives only between start/resume and pause/end/cancel, and
/// is torn down when the last handle is dropped.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    pause_log: Arc<Mutex<PauseLog>>,
    ticker: Arc<Mutex<Option<Ticker>>>,
    events: broadcast::Sender<TimerEvent>,
    tick: Arc<Mutex<TickConfig>>,
    debug_mode: bool,
}

impl TimerController {
    pub fn new(settings: &TimerSettings) -> Self {
        let debug_mode = std::env::var("CHOLOCK_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            pause_log: Arc::new(Mutex::new(PauseLog::default())),
            ticker: Arc::new(Mutex::new(None)),
            events,
            tick: Arc::new(Mutex::new(TickConfig::from_settings(settings, debug_mode))),
            debug_mode,
        }
    }

    /// Switch to new tick settings. Refused while a session is in progress.
    pub async fn apply_settings(&self, settings: &TimerSettings) -> Result<()> {
        let state = self.state.lock().await;
        if state.status != TimerStatus::Idle {
            bail!("cannot change timer settings while a session is in progress");
        }
        *self.tick.lock().await = TickConfig::from_settings(settings, self.debug_mode);
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub async fn get_state(&self) -> TimerState {
        let mut guard = self.state.lock().await;
        guard.sync_active_from_anchor();
        guard.clone()
    }

    pub async fn get_snapshot(&self) -> TimerSnapshot {
        let mut guard = self.state.lock().await;
        guard.sync_active_from_anchor();
        TimerSnapshot {
            remaining_ms: guard.remaining_ms(),
            state: guard.clone(),
        }
    }

    pub async fn start_timer(
        &self,
        book_id: &str,
        target_ms: u64,
        mode: TimerMode,
    ) -> Result<TimerState> {
        let actual_target_ms = match mode {
            TimerMode::Countdown => {
                if target_ms == 0 {
                    bail!("target_ms must be greater than zero for countdown mode");
                }
                target_ms
            }
            TimerMode::Stopwatch => u64::MAX,
        };

        let session_id = Uuid::new_v4().to_string();
        {
            let mut state = self.state.lock().await;
            if state.status != TimerStatus::Idle {
                bail!("timer already active");
            }
            state.begin_session(
                session_id.clone(),
                book_id.to_string(),
                actual_target_ms,
                mode,
                Utc::now(),
                Instant::now(),
            );
        }
        *self.pause_log.lock().await = PauseLog::default();

        self.spawn_ticker().await;

        log_info!("Started reading session {} for book {}", session_id, book_id);
        self.emit_state_changed().await;

        Ok(self.get_state().await)
    }

    pub async fn pause_timer(&self) -> Result<TimerState> {
        {
            let mut state = self.state.lock().await;
            if state.status != TimerStatus::Running {
                bail!("timer is not running");
            }
            let session_id = state
                .session_id
                .clone()
                .ok_or_else(|| anyhow!("missing session id"))?;
            state.pause();
            self.pause_log
                .lock()
                .await
                .open(&session_id, Instant::now());
        }

        self.cancel_ticker().await;
        self.emit_state_changed().await;
        Ok(self.get_state().await)
    }

    pub async fn resume_timer(&self) -> Result<TimerState> {
        {
            let mut state = self.state.lock().await;
            if state.status != TimerStatus::Paused {
                bail!("timer is not paused");
            }
            let now = Instant::now();
            self.pause_log.lock().await.close(now);
            state.resume(now);
        }

        self.spawn_ticker().await;
        self.emit_state_changed().await;
        Ok(self.get_state().await)
    }

    pub async fn end_timer(&self) -> Result<ReadingSession> {
        let stopped_at = Utc::now();

        let session = {
            let mut state = self.state.lock().await;
            if state.status == TimerStatus::Idle {
                bail!("no active session to end");
            }

            state.sync_active_from_anchor();

            let session_id = state
                .session_id
                .clone()
                .ok_or_else(|| anyhow!("missing session id"))?;
            let book_id = state
                .book_id
                .clone()
                .ok_or_else(|| anyhow!("missing book id"))?;
            let started_at = state.started_at.unwrap_or(stopped_at);
            let target_ms = state.target_ms;
            let active_ms = state.current_active_ms().min(target_ms);

            let mut log = self.pause_log.lock().await;
            log.close(Instant::now());
            let log = std::mem::take(&mut *log);

            state.stop();
            state.cancel();

            ReadingSession {
                id: session_id,
                book_id,
                started_at,
                stopped_at: Some(stopped_at),
                status: SessionStatus::Completed,
                target_ms,
                active_ms,
                paused_ms: log.paused_ms,
                pauses: log.pauses,
            }
        };

        self.cancel_ticker().await;

        log_info!(
            "Completed reading session {} ({} ms active, {} ms paused)",
            session.id,
            session.active_ms,
            session.paused_ms
        );

        self.emit_state_changed().await;
        let _ = self.events.send(TimerEvent::SessionCompleted {
            session: session.clone(),
        });

        Ok(session)
    }

    /// Abandon the current session and return it marked cancelled.
    /// Returns `None` when idle.
    pub async fn cancel_timer(&self) -> Result<Option<ReadingSession>> {
        let stopped_at = Utc::now();

        let session = {
            let mut state = self.state.lock().await;
            if state.status == TimerStatus::Idle {
                return Ok(None);
            }

            state.sync_active_from_anchor();

            let session_id = state
                .session_id
                .clone()
                .ok_or_else(|| anyhow!("no active session to cancel"))?;
            let book_id = state
                .book_id
                .clone()
                .ok_or_else(|| anyhow!("missing book id"))?;
            let started_at = state.started_at.unwrap_or(stopped_at);
            let target_ms = state.target_ms;
            let active_ms = state.current_active_ms().min(target_ms);

            let mut log = self.pause_log.lock().await;
            log.close(Instant::now());
            let log = std::mem::take(&mut *log);

            state.cancel();

            ReadingSession {
                id: session_id,
                book_id,
                started_at,
                stopped_at: Some(stopped_at),
                status: SessionStatus::Cancelled,
                target_ms,
                active_ms,
                paused_ms: log.paused_ms,
                pauses: log.pauses,
            }
        };

        self.cancel_ticker().await;
        log_info!(
            "Cancelled reading session {} after {} ms",
            session.id,
            session.active_ms
        );
        self.emit_state_changed().await;
        Ok(Some(session))
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        // Dropping the previous ticker stops it.
        ticker_guard.take();

        let state = self.state.clone();
        let events = self.events.clone();
        let TickConfig {
            tick_interval,
            heartbeat_every_ticks: heartbeat_every,
        } = *self.tick.lock().await;
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            let mut ticks: u32 = 0;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {}
                }

                // Status check and countdown stop share one lock.
                let (snapshot, remaining, finished) = {
                    let mut guard = state.lock().await;
                    if guard.status != TimerStatus::Running {
                        break;
                    }
                    guard.sync_active_from_anchor();
                    let finished = guard.finish_if_elapsed();
                    (guard.clone(), guard.remaining_ms(), finished)
                };

                if finished {
                    log_info!("Countdown finished for session {:?}", snapshot.session_id);
                    emit_timer_state(&events, snapshot);
                    break;
                }

                ticks = ticks.wrapping_add(1);
                if ticks % heartbeat_every == 0 {
                    let _ = events.send(TimerEvent::Heartbeat {
                        active_ms: snapshot.active_ms,
                        remaining_ms: remaining,
                        state: snapshot,
                    });
                }
            }
        });

        *ticker_guard = Some(Ticker {
            handle,
            cancel_token,
        });
    }

    async fn cancel_ticker(&self) {
        self.ticker.lock().await.take();
    }

    async fn emit_state_changed(&self) {
        let mut guard = self.state.lock().await;
        guard.sync_active_from_anchor();
        emit_timer_state(&self.events, guard.clone());
    }
}

fn emit_timer_state(events: &broadcast::Sender<TimerEvent>, state: TimerState) {
    // No subscribers is fine.
    let _ = events.send(TimerEvent::StateChanged {
        remaining_ms: state.remaining_ms(),
        state,
    });
}
