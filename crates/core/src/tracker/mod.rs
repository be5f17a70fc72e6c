//! Tracker façade: lifecycle, serialized event handling, snapshot publication.

mod event;
mod notify;
mod saved;
mod snapshot;
mod variant;
mod worker;

pub use event::{TrackerEvent, TrackerEventSink};
pub use notify::{NoopListener, Notification};
pub use saved::SavedNetworksVariant;
pub use snapshot::TrackerSnapshot;
pub use variant::{EntryLists, TrackerContext, TrackerVariant};

use std::sync::Arc;

use tracing::info;
use wifitrack_api::models::{NetworkEntry, RadioState};
use wifitrack_api::{NoScores, ScoreCache, TrackerListener, WifiPlatform};
use wifitrack_worker::{WorkerConfig, WorkerRuntime};

use crate::clock::{Clock, SystemClock};
use crate::connectivity::ConnectivityTracker;
use crate::error::Result;
use crate::scan_cache::ScanCache;
use crate::scheduler::ScanScheduler;
use crate::settings::TrackerSettings;

use notify::NotificationHandler;
use snapshot::SnapshotCell;
use worker::TrackerWorker;

pub struct WifiTrackerBuilder {
    platform: Arc<dyn WifiPlatform>,
    settings: TrackerSettings,
    clock: Arc<dyn Clock>,
    scores: Arc<dyn ScoreCache>,
    listener: Arc<dyn TrackerListener>,
}

impl WifiTrackerBuilder {
    pub fn new(platform: Arc<dyn WifiPlatform>) -> Self {
        Self {
            platform,
            settings: TrackerSettings::default(),
            clock: Arc::new(SystemClock),
            scores: Arc::new(NoScores),
            listener: Arc::new(NoopListener),
        }
    }

    pub fn settings(mut self, settings: TrackerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn scores(mut self, scores: Arc<dyn ScoreCache>) -> Self {
        self.scores = scores;
        self
    }

    pub fn listener(mut self, listener: Arc<dyn TrackerListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Build a saved-networks tracker. Must be called inside a tokio runtime.
    pub fn build(self) -> Result<WifiTracker> {
        self.build_with_variant(SavedNetworksVariant::new())
    }

    pub fn build_with_variant<V: TrackerVariant>(self, variant: V) -> Result<WifiTracker> {
        self.settings.validate()?;
        let verbose = self.settings.verbose_logging;

        let snapshot = SnapshotCell::default();
        let scheduler = Arc::new(ScanScheduler::new(Arc::clone(&self.platform), &self.settings));
        let notifier = WorkerRuntime::spawn(
            WorkerConfig::named("tracker-listener").with_verbose(verbose),
            NotificationHandler::new(self.listener),
        );

        let ctx = TrackerContext {
            platform: self.platform,
            scores: self.scores,
            clock: self.clock,
            reducer: self.settings.reducer(),
            order: self.settings.entry_order(),
            scan_cache: ScanCache::new(self.settings.retention_ms()),
            connectivity: ConnectivityTracker::new(),
            radio_state: RadioState::Unknown,
            settings: self.settings.clone(),
        };
        let worker = WorkerRuntime::spawn(
            WorkerConfig::named(format!("tracker-{}", variant.name())).with_verbose(verbose),
            TrackerWorker::new(
                variant,
                ctx,
                Arc::clone(&scheduler),
                snapshot.clone(),
                notifier.handle(),
            ),
        );

        Ok(WifiTracker {
            worker,
            notifier,
            scheduler,
            snapshot,
            settings: self.settings,
        })
    }
}

/// Live, sorted view of saved and subscription networks.
///
/// All mutation happens on one worker task; getters read the last published
/// snapshot and are safe from any thread.
pub struct WifiTracker {
    worker: WorkerRuntime<TrackerEvent>,
    notifier: WorkerRuntime<Notification>,
    scheduler: Arc<ScanScheduler>,
    snapshot: SnapshotCell,
    settings: TrackerSettings,
}

impl WifiTracker {
    pub fn builder(platform: Arc<dyn WifiPlatform>) -> WifiTrackerBuilder {
        WifiTrackerBuilder::new(platform)
    }

    pub fn start(&self) -> Result<()> {
        info!("Starting tracker");
        self.worker.handle().post(TrackerEvent::Start)?;
        Ok(())
    }

    /// Cancel scanning right away; entries are cleared on the worker.
    pub fn stop(&self) -> Result<()> {
        info!("Stopping tracker");
        self.scheduler.stop();
        self.worker.handle().post(TrackerEvent::Stop)?;
        Ok(())
    }

    pub fn event_sink(&self) -> TrackerEventSink {
        TrackerEventSink::new(self.worker.handle())
    }

    pub fn saved_entries(&self) -> Vec<NetworkEntry> {
        self.snapshot.load().saved.as_ref().clone()
    }

    pub fn subscription_entries(&self) -> Vec<NetworkEntry> {
        self.snapshot.load().subscriptions.as_ref().clone()
    }

    pub fn wifi_state(&self) -> RadioState {
        self.snapshot.load().wifi_state
    }

    pub fn snapshot(&self) -> Arc<TrackerSnapshot> {
        self.snapshot.load()
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn is_scanning(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scan_retry_count(&self) -> u32 {
        self.scheduler.retry_count()
    }

    /// Wait until every event posted so far is handled and its callbacks delivered.
    pub async fn flush(&self) -> Result<()> {
        self.worker.handle().barrier().await?;
        self.notifier.handle().barrier().await?;
        Ok(())
    }

    /// Stop both workers and wait for them to exit.
    pub async fn shutdown(&self) -> Result<()> {
        self.scheduler.stop();
        self.worker.join().await?;
        self.notifier.join().await?;
        Ok(())
    }
}

impl Drop for WifiTracker {
    fn drop(&mut self) {
        self.scheduler.stop();
    }
}
