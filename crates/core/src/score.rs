//! Speed metadata derived from the score collaborator.

use wifitrack_api::models::{NetworkEntry, Speed};
use wifitrack_api::ScoreCache;

use crate::config_store::EntryTable;

/// Average of the non-zero speeds reported for the entry's bssids.
pub fn derive_speed(entry: &NetworkEntry, scores: &dyn ScoreCache) -> Speed {
    let (sum, count) = entry
        .bssids()
        .filter_map(|bssid| scores.speed_for(bssid))
        .map(Speed::value)
        .filter(|value| *value != 0)
        .fold((0u32, 0u32), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        return Speed::None;
    }
    Speed::closest(f64::from(sum) / f64::from(count))
}

/// Recompute speed for every entry. Returns whether anything changed.
pub fn refresh_speeds(table: &mut EntryTable, scores: &dyn ScoreCache) -> bool {
    let mut changed = false;
    for entry in table.values_mut() {
        let speed = derive_speed(entry, scores);
        if entry.speed != speed {
            entry.speed = speed;
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wifitrack_api::models::{
        ConfigRecord, NetworkIdentity, ScanData, ScanObservation, SecurityGroup,
    };

    struct FixedScores(HashMap<&'static str, Speed>);

    impl ScoreCache for FixedScores {
        fn speed_for(&self, bssid: &str) -> Option<Speed> {
            self.0.get(bssid).copied()
        }
    }

    fn entry_with(bssids: &[&str]) -> NetworkEntry {
        let mut entry = NetworkEntry::new(
            NetworkIdentity::standard("Home", SecurityGroup::Personal),
            ConfigRecord::Standard { configs: Vec::new() },
        );
        entry.scan = Some(ScanData {
            observations: bssids
                .iter()
                .map(|bssid| ScanObservation {
                    ssid: "Home".to_string(),
                    bssid: bssid.to_string(),
                    level: -50,
                    frequency_mhz: 2412,
                    capabilities: String::new(),
                    timestamp_ms: 0,
                })
                .collect(),
            roaming: false,
        });
        entry
    }

    #[test]
    fn test_average_ignores_unscored_and_zero() {
        let scores = FixedScores(HashMap::from([
            ("a", Speed::Fast),
            ("b", Speed::Slow),
            ("c", Speed::None),
        ]));
        // (20 + 5) / 2 = 12.5
        assert_eq!(derive_speed(&entry_with(&["a", "b", "c", "d"]), &scores), Speed::Moderate);
        assert_eq!(derive_speed(&entry_with(&["c", "d"]), &scores), Speed::None);
    }
}
