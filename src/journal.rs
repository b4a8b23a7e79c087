//! App-level state tying the catalog, timer, navigation and settings together.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    analytics::ReadingStats,
    catalog::Catalog,
    log_info,
    models::{Book, Choseo, ReadingSession},
    navigation::{Navigator, Screen},
    overlap::{compare_with_readers, overlap_tier, ComparisonSort, RankedComparison, TierBadge},
    settings::{SettingsStore, TimerSettings},
    timer::{TimerController, TimerMode, TimerState},
};

const ENABLE_LOGS: bool = true;
const TOP_BOOKS: usize = 3;

/// One row of the comparison screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub comparison: RankedComparison,
    pub badge: TierBadge,
}

pub struct ReadingJournal {
    catalog: Arc<Catalog>,
    settings: SettingsStore,
    timer: TimerController,
    navigator: Mutex<Navigator>,
    sessions: Mutex<Vec<ReadingSession>>,
}

impl ReadingJournal {
    pub fn new(catalog: Arc<Catalog>, settings: SettingsStore) -> Self {
        let timer = TimerController::new(&settings.timer());
        Self {
            catalog,
            settings,
            timer,
            navigator: Mutex::new(Navigator::default()),
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn timer(&self) -> &TimerController {
        &self.timer
    }

    pub async fn current_screen(&self) -> Screen {
        self.navigator.lock().await.current().clone()
    }

    pub async fn navigate(&self, screen: Screen) {
        self.navigator.lock().await.navigate(screen);
    }

    pub async fn back(&self) -> Option<Screen> {
        self.navigator.lock().await.back()
    }

    fn book(&self, book_id: &str) -> Result<Book> {
        self.catalog
            .book(book_id)
            .cloned()
            .ok_or_else(|| anyhow!("unknown book '{book_id}'"))
    }

    fn choseo(&self, choseo_id: &str) -> Result<Choseo> {
        self.catalog
            .choseo(choseo_id)
            .cloned()
            .ok_or_else(|| anyhow!("unknown choseo '{choseo_id}'"))
    }

    /// Start a reading session; `target_ms` falls back to the configured default.
    pub async fn start_reading(
        &self,
        book_id: &str,
        mode: TimerMode,
        target_ms: Option<u64>,
    ) -> Result<TimerState> {
        let book = self.book(book_id)?;
        let target_ms = target_ms.unwrap_or(self.settings.timer().default_target_ms);
        let state = self.timer.start_timer(&book.id, target_ms, mode).await?;
        self.navigate(Screen::Timer(book)).await;
        Ok(state)
    }

    /// End the session and show its summary in place of the timer.
    pub async fn finish_reading(&self) -> Result<ReadingSession> {
        let session = self.timer.end_timer().await?;
        self.sessions.lock().await.push(session.clone());
        self.navigator
            .lock()
            .await
            .replace(Screen::SessionSummary(session.clone()));
        Ok(session)
    }

    /// Abandon the session. It is still recorded so analytics can count it.
    pub async fn cancel_reading(&self) -> Result<Option<ReadingSession>> {
        let session = self.timer.cancel_timer().await?;
        if let Some(session) = &session {
            self.sessions.lock().await.push(session.clone());
        }
        let mut navigator = self.navigator.lock().await;
        if matches!(navigator.current(), Screen::Timer(_)) {
            navigator.back();
        }
        Ok(session)
    }

    /// Save new timer settings and apply them to the timer. Refused while a
    /// session is in progress, in which case nothing is saved.
    pub async fn update_timer_settings(&self, timer: TimerSettings) -> Result<()> {
        self.timer.apply_settings(&timer).await?;
        self.settings.update_timer(timer)?;
        log_info!(
            "Timer settings updated: tick {} ms, heartbeat every {} ticks",
            timer.tick_interval_ms,
            timer.heartbeat_every_ticks
        );
        Ok(())
    }

    pub async fn sessions(&self) -> Vec<ReadingSession> {
        self.sessions.lock().await.clone()
    }

    /// Other readers' quotes on the same book, scored against this choseo.
    pub async fn compare(
        &self,
        choseo_id: &str,
        sort: ComparisonSort,
    ) -> Result<Vec<ComparisonEntry>> {
        let mine = self.choseo(choseo_id)?;
        let config = self.settings.overlap();
        let comparisons = compare_with_readers(&mine, &self.catalog.choseos, &config);
        let entries: Vec<ComparisonEntry> = sort
            .apply(comparisons, &config)
            .into_iter()
            .map(|comparison| ComparisonEntry {
                badge: overlap_tier(comparison.overlap.score),
                comparison,
            })
            .collect();

        log_info!(
            "Comparison for {} ({:?}): {} entries",
            choseo_id,
            sort,
            entries.len()
        );

        self.navigate(Screen::Comparison(mine)).await;
        Ok(entries)
    }

    /// Today's date at the reader's configured offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now()
            .with_timezone(&self.settings.analytics().offset())
            .date_naive()
    }

    pub async fn stats(&self, today: NaiveDate) -> ReadingStats {
        let offset = self.settings.analytics().offset();
        ReadingStats::from_sessions(&self.sessions.lock().await, today, offset, TOP_BOOKS)
    }
}
