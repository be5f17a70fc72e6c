use std::sync::Arc;

use wifitrack_api::models::{NetworkEntry, RadioState, ScanObservation};
use wifitrack_api::{ScoreCache, WifiPlatform};

use crate::clock::Clock;
use crate::connectivity::ConnectivityTracker;
use crate::error::Result;
use crate::order::EntryOrder;
use crate::scan_cache::{ScanCache, ScanReducer};
use crate::settings::TrackerSettings;

/// Worker-owned state shared by the base engine and its variant.
pub struct TrackerContext {
    pub platform: Arc<dyn WifiPlatform>,
    pub scores: Arc<dyn ScoreCache>,
    pub clock: Arc<dyn Clock>,
    pub settings: TrackerSettings,
    pub reducer: Arc<dyn ScanReducer>,
    pub order: Arc<dyn EntryOrder>,
    pub scan_cache: ScanCache,
    pub connectivity: ConnectivityTracker,
    pub radio_state: RadioState,
}

impl TrackerContext {
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Pull the latest scan results from the platform into the cache.
    pub fn refresh_scan_cache(&mut self) -> Result<()> {
        let observations = self.platform.scan_results()?;
        let now = self.now_ms();
        self.scan_cache.update(observations, now);
        Ok(())
    }

    /// Observations to reconcile against.
    ///
    /// Empty while the radio is disabled. `last_scan_failed` widens the
    /// window by one scan interval so entries do not blink out after a
    /// single failed cycle.
    pub fn fresh_observations(&self, last_scan_failed: bool) -> Vec<ScanObservation> {
        if self.radio_state == RadioState::Disabled {
            return Vec::new();
        }
        let window = if last_scan_failed {
            self.settings.failed_window_ms()
        } else {
            self.settings.normal_window_ms()
        };
        self.scan_cache.query(self.now_ms(), window)
    }
}

/// Sorted lists a variant publishes after each event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryLists {
    pub saved: Vec<NetworkEntry>,
    pub subscriptions: Vec<NetworkEntry>,
}

/// Data-specific half of a tracker.
///
/// The base engine owns dispatch, the scan cache, connectivity and
/// scheduling; a variant owns its entry tables and decides how each trigger
/// reconciles them. Hooks only run on the worker.
pub trait TrackerVariant: Send + 'static {
    fn name(&self) -> &'static str;

    /// One-time initialization after `start()`.
    fn on_start(&mut self, ctx: &mut TrackerContext) -> Result<()>;

    fn on_radio_state_changed(&mut self, ctx: &mut TrackerContext) -> Result<()>;

    fn on_scan_results(&mut self, ctx: &mut TrackerContext, last_scan_failed: bool) -> Result<()>;

    fn on_configs_changed(&mut self, ctx: &mut TrackerContext) -> Result<()>;

    fn on_connectivity_changed(&mut self, ctx: &mut TrackerContext) -> Result<()>;

    fn on_score_cache_updated(&mut self, ctx: &mut TrackerContext) -> Result<()>;

    /// Drop every tracked entry.
    fn on_stop(&mut self);

    fn entry_lists(&self, ctx: &TrackerContext) -> EntryLists;
}
