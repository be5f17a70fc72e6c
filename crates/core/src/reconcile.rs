//! Join of tracked entries against cached scan observations.

use std::collections::{HashMap, HashSet};

use tracing::warn;
use wifitrack_api::models::{NetworkEntry, NetworkIdentity, ScanData, ScanObservation, WifiConfig};
use wifitrack_api::PasspointMatch;

use crate::config_store::EntryTable;
use crate::order::EntryOrder;
use crate::scan_cache::ScanReducer;

/// Observations grouped under every standard identity they advertise.
pub fn group_by_identity(
    observations: &[ScanObservation],
) -> HashMap<NetworkIdentity, Vec<ScanObservation>> {
    let mut groups: HashMap<NetworkIdentity, Vec<ScanObservation>> = HashMap::new();
    for observation in observations {
        for identity in observation.identities() {
            groups.entry(identity).or_default().push(observation.clone());
        }
    }
    groups
}

/// Attach the reduced observations of each entry's identity, clearing entries with none.
pub fn reconcile_standard(
    table: &mut EntryTable,
    observations: &[ScanObservation],
    reducer: &dyn ScanReducer,
) {
    let mut groups = group_by_identity(observations);
    for (identity, entry) in table.iter_mut() {
        entry.scan = groups
            .remove(identity)
            .map(|group| reducer.reduce(group))
            .filter(|reduced| !reduced.is_empty())
            .map(|observations| ScanData {
                observations,
                roaming: false,
            });
    }
}

#[derive(Default)]
struct ProfileMatch {
    config: Option<WifiConfig>,
    home: Vec<ScanObservation>,
    roaming: Vec<ScanObservation>,
}

/// Apply matcher output to the subscription table.
///
/// Home observations win over roaming ones. Entries whose profile was not
/// matched lose their scan data, and matches for untracked profiles are ignored.
pub fn reconcile_passpoint(
    table: &mut EntryTable,
    matches: Vec<PasspointMatch>,
    reducer: &dyn ScanReducer,
) {
    let mut by_profile: HashMap<String, ProfileMatch> = HashMap::new();
    for m in matches {
        let Some(profile_id) = m.config.passpoint_unique_id.clone() else {
            warn!("Passpoint match for network {} carries no profile id", m.config.network_id);
            continue;
        };
        let slot = by_profile.entry(profile_id).or_default();
        slot.home.extend(m.home);
        slot.roaming.extend(m.roaming);
        slot.config.get_or_insert(m.config);
    }

    let mut seen = HashSet::new();
    for (profile_id, slot) in by_profile {
        let identity = NetworkIdentity::passpoint(profile_id);
        let Some(entry) = table.get_mut(&identity) else {
            continue;
        };
        let (observations, roaming) = if !slot.home.is_empty() {
            (reducer.reduce(slot.home), false)
        } else {
            (reducer.reduce(slot.roaming), true)
        };
        entry.scan = (!observations.is_empty()).then_some(ScanData {
            observations,
            roaming,
        });
        entry.matched_config = slot.config;
        seen.insert(identity);
    }

    for (identity, entry) in table.iter_mut() {
        if !seen.contains(identity) {
            entry.scan = None;
            entry.matched_config = None;
        }
    }
}

/// One fully sorted copy of the table.
pub fn sorted_entries(table: &EntryTable, order: &dyn EntryOrder) -> Vec<NetworkEntry> {
    let mut entries: Vec<NetworkEntry> = table.values().cloned().collect();
    entries.sort_by(|a, b| order.compare(a, b));
    entries
}
