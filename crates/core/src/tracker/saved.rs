use tracing::debug;

use crate::config_store::{ConfigStore, validate_passpoint_configs, validate_standard_configs};
use crate::error::Result;
use crate::reconcile::{reconcile_passpoint, reconcile_standard, sorted_entries};
use crate::score::refresh_speeds;

use super::variant::{EntryLists, TrackerContext, TrackerVariant};

/// Tracks saved networks and Passpoint subscriptions.
#[derive(Debug, Default)]
pub struct SavedNetworksVariant {
    store: ConfigStore,
}

impl SavedNetworksVariant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    // Both listings are fetched and validated before either table is touched.
    fn sync_configs(&mut self, ctx: &TrackerContext) -> Result<()> {
        let configs = ctx.platform.configured_networks()?;
        let profiles = ctx.platform.passpoint_configs()?;
        validate_standard_configs(&configs)?;
        validate_passpoint_configs(&profiles)?;

        let saved = self.store.sync_standard_configs(configs)?;
        let subscriptions = self.store.sync_passpoint_configs(profiles)?;
        if ctx.settings.verbose_logging {
            debug!(?saved, ?subscriptions, "configurations synced");
        }
        Ok(())
    }

    fn reconcile(&mut self, ctx: &TrackerContext, last_scan_failed: bool) -> Result<()> {
        let observations = ctx.fresh_observations(last_scan_failed);
        let matches = if observations.is_empty() || self.store.subscriptions().is_empty() {
            Vec::new()
        } else {
            ctx.platform.match_passpoint(&observations)?
        };

        let reducer = ctx.reducer.as_ref();
        reconcile_standard(self.store.saved_mut(), &observations, reducer);
        reconcile_passpoint(self.store.subscriptions_mut(), matches, reducer);
        self.refresh_speeds(ctx);
        self.apply_connectivity(ctx);
        Ok(())
    }

    fn refresh_speeds(&mut self, ctx: &TrackerContext) {
        let scores = ctx.scores.as_ref();
        refresh_speeds(self.store.saved_mut(), scores);
        refresh_speeds(self.store.subscriptions_mut(), scores);
    }

    fn apply_connectivity(&mut self, ctx: &TrackerContext) {
        ctx.connectivity.apply_to(self.store.saved_mut());
        ctx.connectivity.apply_to(self.store.subscriptions_mut());
    }
}

impl TrackerVariant for SavedNetworksVariant {
    fn name(&self) -> &'static str {
        "saved_networks"
    }

    fn on_start(&mut self, ctx: &mut TrackerContext) -> Result<()> {
        self.sync_configs(ctx)?;
        self.reconcile(ctx, false)
    }

    fn on_radio_state_changed(&mut self, ctx: &mut TrackerContext) -> Result<()> {
        self.reconcile(ctx, false)
    }

    fn on_scan_results(&mut self, ctx: &mut TrackerContext, last_scan_failed: bool) -> Result<()> {
        self.reconcile(ctx, last_scan_failed)
    }

    fn on_configs_changed(&mut self, ctx: &mut TrackerContext) -> Result<()> {
        self.sync_configs(ctx)?;
        self.reconcile(ctx, false)
    }

    fn on_connectivity_changed(&mut self, ctx: &mut TrackerContext) -> Result<()> {
        self.apply_connectivity(ctx);
        Ok(())
    }

    fn on_score_cache_updated(&mut self, ctx: &mut TrackerContext) -> Result<()> {
        self.refresh_speeds(ctx);
        Ok(())
    }

    fn on_stop(&mut self) {
        self.store.clear();
    }

    fn entry_lists(&self, ctx: &TrackerContext) -> EntryLists {
        let order = ctx.order.as_ref();
        EntryLists {
            saved: sorted_entries(self.store.saved(), order),
            subscriptions: sorted_entries(self.store.subscriptions(), order),
        }
    }
}
