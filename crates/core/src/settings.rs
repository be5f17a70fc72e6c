//! Tracker settings shared by every component of one tracker instance.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, TrackerError};
use crate::order::{EntryOrder, PickerOrder, TitleOrder};
use crate::scan_cache::{BestSignal, RetainAll, ScanReducer};

pub const DEFAULT_MAX_SCAN_AGE_MS: u64 = 15_000;
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_SCAN_RETRY_LIMIT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReducerKind {
    #[default]
    RetainAll,
    BestSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    #[default]
    Title,
    Picker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Maximum age of a scan observation still shown as in range.
    pub max_scan_age_ms: u64,
    /// Interval between scan requests.
    pub scan_interval_ms: u64,
    /// Consecutive rejected scan requests before giving up for the cycle.
    pub scan_retry_limit: u32,
    pub verbose_logging: bool,
    pub reducer: ReducerKind,
    pub order: OrderKind,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            max_scan_age_ms: DEFAULT_MAX_SCAN_AGE_MS,
            scan_interval_ms: DEFAULT_SCAN_INTERVAL_MS,
            scan_retry_limit: DEFAULT_SCAN_RETRY_LIMIT,
            verbose_logging: false,
            reducer: ReducerKind::default(),
            order: OrderKind::default(),
        }
    }
}

impl TrackerSettings {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan_interval_ms == 0 {
            return Err(TrackerError::Settings(
                "scan_interval_ms must be positive".to_string(),
            ));
        }
        if self.scan_retry_limit == 0 {
            return Err(TrackerError::Settings(
                "scan_retry_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    /// Window applied after a successful scan cycle or a config change.
    pub fn normal_window_ms(&self) -> u64 {
        self.max_scan_age_ms.saturating_add(self.scan_interval_ms)
    }

    /// Window applied when the last scan cycle is known to have failed.
    pub fn failed_window_ms(&self) -> u64 {
        self.normal_window_ms().saturating_add(self.scan_interval_ms)
    }

    /// How long the cache keeps an observation at all.
    pub fn retention_ms(&self) -> u64 {
        self.failed_window_ms()
    }

    pub fn reducer(&self) -> Arc<dyn ScanReducer> {
        match self.reducer {
            ReducerKind::RetainAll => Arc::new(RetainAll),
            ReducerKind::BestSignal => Arc::new(BestSignal),
        }
    }

    pub fn entry_order(&self) -> Arc<dyn EntryOrder> {
        match self.order {
            OrderKind::Title => Arc::new(TitleOrder),
            OrderKind::Picker => Arc::new(PickerOrder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_windows_widen_by_one_interval() {
        let settings = TrackerSettings {
            max_scan_age_ms: 15_000,
            scan_interval_ms: 10_000,
            ..TrackerSettings::default()
        };
        assert_eq!(settings.normal_window_ms(), 25_000);
        assert_eq!(settings.failed_window_ms(), 35_000);
        assert_eq!(settings.retention_ms(), 35_000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scan_interval_ms": 2000, "order": "picker"}}"#).unwrap();

        let settings = TrackerSettings::from_json_file(file.path()).unwrap();
        assert_eq!(settings.scan_interval_ms, 2000);
        assert_eq!(settings.order, OrderKind::Picker);
        assert_eq!(settings.max_scan_age_ms, DEFAULT_MAX_SCAN_AGE_MS);
        assert_eq!(settings.scan_retry_limit, DEFAULT_SCAN_RETRY_LIMIT);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scan_interval_ms": 0}}"#).unwrap();

        let err = TrackerSettings::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, TrackerError::Settings(_)));
    }
}
