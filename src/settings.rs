use anyhow::{Context, Result};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{log_warn, overlap::OverlapConfig};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerSettings {
    pub default_target_ms: u64,
    pub tick_interval_ms: u64,
    pub heartbeat_every_ticks: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_target_ms: 25 * 60 * 1000,
            tick_interval_ms: 1_000,
            heartbeat_every_ticks: 10,
        }
    }
}

/// Korea Standard Time, UTC+9.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSettings {
    /// The reader's offset from UTC; decides which calendar day a session falls on.
    pub utc_offset_minutes: i32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

impl AnalyticsSettings {
    /// Out-of-range offsets fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub overlap: OverlapConfig,
    pub timer: TimerSettings,
    pub analytics: AnalyticsSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    /// Open the store at `path`. A missing or unparsable file yields defaults.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "Ignoring malformed settings at {}: {}",
                    path.display(),
                    err
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> UserSettings {
        self.read().clone()
    }

    pub fn overlap(&self) -> OverlapConfig {
        self.read().overlap
    }

    pub fn timer(&self) -> TimerSettings {
        self.read().timer
    }

    pub fn analytics(&self) -> AnalyticsSettings {
        self.read().analytics
    }

    pub fn update_overlap(&self, overlap: OverlapConfig) -> Result<()> {
        let mut guard = self.write();
        guard.overlap = overlap;
        self.persist(&guard)
    }

    pub fn update_timer(&self, timer: TimerSettings) -> Result<()> {
        let mut guard = self.write();
        guard.timer = timer;
        self.persist(&guard)
    }

    pub fn update_analytics(&self, analytics: AnalyticsSettings) -> Result<()> {
        let mut guard = self.write();
        guard.analytics = analytics;
        self.persist(&guard)
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: UserSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings at {}", self.path.display()))?;
        *self.write() = data;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
