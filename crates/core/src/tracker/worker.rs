use std::sync::Arc;

use tracing::{debug, info, warn};
use wifitrack_api::models::RadioState;
use wifitrack_worker::{EventHandler, WorkerHandle};

use crate::error::{Result, TrackerError};
use crate::scheduler::ScanScheduler;

use super::event::TrackerEvent;
use super::notify::Notification;
use super::snapshot::{SnapshotCell, TrackerSnapshot};
use super::variant::{TrackerContext, TrackerVariant};

/// Owns all mutable tracker state; only ever runs on the tracker worker.
pub(crate) struct TrackerWorker<V> {
    variant: V,
    ctx: TrackerContext,
    scheduler: Arc<ScanScheduler>,
    snapshot: SnapshotCell,
    notifier: WorkerHandle<Notification>,
    active: bool,
    initialized: bool,
}

impl<V: TrackerVariant> TrackerWorker<V> {
    pub(crate) fn new(
        variant: V,
        ctx: TrackerContext,
        scheduler: Arc<ScanScheduler>,
        snapshot: SnapshotCell,
        notifier: WorkerHandle<Notification>,
    ) -> Self {
        Self {
            variant,
            ctx,
            scheduler,
            snapshot,
            notifier,
            active: false,
            initialized: false,
        }
    }

    fn verbose(&self) -> bool {
        self.ctx.settings.verbose_logging
    }

    fn initialize(&mut self) -> Result<()> {
        self.ctx.radio_state = self.ctx.platform.radio_state();
        if self.ctx.radio_state != RadioState::Disabled {
            self.ctx.refresh_scan_cache()?;
        }
        if let Some(connection) = self.ctx.platform.current_connection() {
            self.ctx.connectivity.seed(&connection);
        }
        self.variant.on_start(&mut self.ctx)?;

        if self.ctx.radio_state.is_enabled() {
            self.scheduler.start();
        }
        self.initialized = true;
        info!(
            variant = self.variant.name(),
            radio = ?self.ctx.radio_state,
            "Tracker initialized"
        );
        Ok(())
    }

    fn stop(&mut self) {
        self.scheduler.stop();
        self.variant.on_stop();
        self.ctx.scan_cache.clear();
        self.ctx.connectivity.reset();
        self.active = false;
        self.initialized = false;
        info!(variant = self.variant.name(), "Tracker stopped");
    }

    fn on_radio_state_changed(&mut self, state: RadioState) -> Result<()> {
        self.ctx.radio_state = state;
        if state == RadioState::Disabled {
            if let Some(network) = self.ctx.connectivity.primary_network() {
                self.ctx.connectivity.on_network_lost(network);
            }
        }

        if state.is_enabled() {
            self.scheduler.start();
        } else {
            self.scheduler.stop();
        }
        if state != RadioState::Disabled {
            self.ctx.refresh_scan_cache()?;
        }
        self.variant.on_radio_state_changed(&mut self.ctx)
    }

    fn on_scan_results(&mut self, updated: bool) -> Result<()> {
        if updated && self.ctx.radio_state != RadioState::Disabled {
            self.ctx.refresh_scan_cache()?;
        }
        self.variant.on_scan_results(&mut self.ctx, !updated)
    }

    fn on_connectivity(&mut self, changed: bool) -> Result<()> {
        if !changed {
            return Ok(());
        }
        self.variant.on_connectivity_changed(&mut self.ctx)
    }

    fn dispatch(&mut self, event: TrackerEvent) -> Result<()> {
        match event {
            TrackerEvent::Start | TrackerEvent::Stop => Ok(()),
            TrackerEvent::RadioStateChanged(state) => self.on_radio_state_changed(state),
            TrackerEvent::ScanResultsAvailable { updated } => self.on_scan_results(updated),
            TrackerEvent::ConfiguredNetworksChanged => {
                self.variant.on_configs_changed(&mut self.ctx)
            }
            TrackerEvent::LinkPropertiesChanged {
                network,
                link_properties,
            } => {
                let changed = self
                    .ctx
                    .connectivity
                    .on_link_properties_changed(network, &link_properties);
                self.on_connectivity(changed)
            }
            TrackerEvent::CapabilitiesChanged {
                network,
                capabilities,
            } => {
                let changed = self
                    .ctx
                    .connectivity
                    .on_capabilities_changed(network, &capabilities);
                self.on_connectivity(changed)
            }
            TrackerEvent::NetworkLost { network } => {
                let changed = self.ctx.connectivity.on_network_lost(network);
                self.on_connectivity(changed)
            }
            TrackerEvent::DefaultCapabilitiesChanged {
                network,
                capabilities,
            } => {
                let changed = self
                    .ctx
                    .connectivity
                    .on_default_capabilities_changed(network, &capabilities);
                self.on_connectivity(changed)
            }
            TrackerEvent::DefaultNetworkLost => {
                let changed = self.ctx.connectivity.on_default_network_lost();
                self.on_connectivity(changed)
            }
            TrackerEvent::ScoreCacheUpdated => self.variant.on_score_cache_updated(&mut self.ctx),
        }
    }

    /// Swap in a new snapshot and queue notifications for whatever changed.
    fn publish(&mut self) {
        let lists = self.variant.entry_lists(&self.ctx);
        let current = self.snapshot.load();

        let mut notifications = Vec::new();
        if current.wifi_state != self.ctx.radio_state {
            notifications.push(Notification::WifiStateChanged);
        }
        if *current.saved != lists.saved {
            notifications.push(Notification::SavedEntriesChanged);
        }
        if *current.subscriptions != lists.subscriptions {
            notifications.push(Notification::SubscriptionEntriesChanged);
        }
        if notifications.is_empty() {
            return;
        }

        self.snapshot.store(TrackerSnapshot {
            saved: Arc::new(lists.saved),
            subscriptions: Arc::new(lists.subscriptions),
            wifi_state: self.ctx.radio_state,
        });
        for notification in notifications {
            if let Err(e) = self.notifier.post(notification) {
                warn!("Dropping {notification:?}: {e}");
            }
        }
    }
}

impl<V: TrackerVariant> EventHandler<TrackerEvent> for TrackerWorker<V> {
    type Error = TrackerError;

    fn handle(&mut self, event: TrackerEvent) -> Result<()> {
        match event {
            TrackerEvent::Start => self.active = true,
            TrackerEvent::Stop => {
                if self.active || self.initialized {
                    self.stop();
                }
                self.publish();
                return Ok(());
            }
            _ if !self.active => {
                if self.verbose() {
                    debug!(event = event.name(), "Tracker not started; event dropped");
                }
                return Ok(());
            }
            _ => {}
        }

        if !self.initialized {
            self.initialize()?;
        } else if self.verbose() {
            debug!(event = event.name(), "Handling tracker event");
        }

        let outcome = self.dispatch(event);
        self.publish();
        outcome
    }

    fn on_shutdown(&mut self) {
        self.scheduler.stop();
    }
}
