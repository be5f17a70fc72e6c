//! Keyed entry tables synchronized from the platform configuration store.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use wifitrack_api::models::{ConfigRecord, NetworkEntry, NetworkIdentity, PasspointConfig, WifiConfig};

use crate::error::{Result, TrackerError};

pub type EntryTable = BTreeMap<NetworkIdentity, NetworkEntry>;

/// What one full-replacement sync did to a table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.updated == 0 && self.removed == 0
    }
}

/// Saved (standard) and subscription (Passpoint) entries keyed by identity.
#[derive(Debug, Default)]
pub struct ConfigStore {
    saved: EntryTable,
    subscriptions: EntryTable,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the saved entries with the user-saved subset of `configs`.
    pub fn sync_standard_configs(&mut self, configs: Vec<WifiConfig>) -> Result<SyncReport> {
        validate_standard_configs(&configs)?;

        let mut groups: IndexMap<NetworkIdentity, Vec<WifiConfig>> = IndexMap::new();
        for config in configs.into_iter().filter(WifiConfig::is_user_saved) {
            groups.entry(config.identity()).or_default().push(config);
        }

        let records = groups
            .into_iter()
            .map(|(identity, configs)| (identity, ConfigRecord::Standard { configs }))
            .collect();
        Ok(replace_records(&mut self.saved, records))
    }

    /// Replace the subscription entries with `configs`, keyed by profile id.
    pub fn sync_passpoint_configs(&mut self, configs: Vec<PasspointConfig>) -> Result<SyncReport> {
        validate_passpoint_configs(&configs)?;

        let records = configs
            .into_iter()
            .map(|profile| (profile.identity(), ConfigRecord::Passpoint { profile }))
            .collect();
        Ok(replace_records(&mut self.subscriptions, records))
    }

    pub fn saved(&self) -> &EntryTable {
        &self.saved
    }

    pub fn saved_mut(&mut self) -> &mut EntryTable {
        &mut self.saved
    }

    pub fn subscriptions(&self) -> &EntryTable {
        &self.subscriptions
    }

    pub fn subscriptions_mut(&mut self) -> &mut EntryTable {
        &mut self.subscriptions
    }

    pub fn clear(&mut self) {
        self.saved.clear();
        self.subscriptions.clear();
    }
}

/// Every standard configuration needs an SSID.
pub fn validate_standard_configs(configs: &[WifiConfig]) -> Result<()> {
    match configs.iter().find(|c| !c.is_passpoint() && c.ssid.is_empty()) {
        Some(bad) => Err(TrackerError::InvalidInput(format!(
            "configuration {} has an empty ssid",
            bad.network_id
        ))),
        None => Ok(()),
    }
}

/// Profile ids must be present and unique.
pub fn validate_passpoint_configs(configs: &[PasspointConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for config in configs {
        if config.unique_id.is_empty() {
            return Err(TrackerError::InvalidInput(
                "passpoint configuration with an empty unique id".to_string(),
            ));
        }
        if !seen.insert(config.unique_id.as_str()) {
            return Err(TrackerError::InvalidInput(format!(
                "duplicate passpoint unique id {}",
                config.unique_id
            )));
        }
    }
    Ok(())
}

// Tracked entries consume their matching record or are dropped; leftovers become new entries.
fn replace_records(
    table: &mut EntryTable,
    mut records: IndexMap<NetworkIdentity, ConfigRecord>,
) -> SyncReport {
    let mut report = SyncReport::default();

    table.retain(|identity, entry| match records.shift_remove(identity) {
        Some(record) => {
            if entry.config.as_ref() != Some(&record) {
                entry.config = Some(record);
                report.updated += 1;
            }
            true
        }
        None => {
            report.removed += 1;
            false
        }
    });

    for (identity, record) in records {
        table.insert(identity.clone(), NetworkEntry::new(identity, record));
        report.added += 1;
    }
    report
}
