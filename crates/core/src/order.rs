//! Pluggable total orders over entries.

use std::cmp::Ordering;

use wifitrack_api::models::NetworkEntry;

/// Total order used to sort published entry lists.
///
/// Implementations must return `Equal` only for entries with equal identities.
pub trait EntryOrder: Send + Sync {
    fn compare(&self, a: &NetworkEntry, b: &NetworkEntry) -> Ordering;

    fn name(&self) -> &'static str;
}

/// Case-insensitive title, then exact title, then identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleOrder;

impl EntryOrder for TitleOrder {
    fn compare(&self, a: &NetworkEntry, b: &NetworkEntry) -> Ordering {
        by_title(a, b)
    }

    fn name(&self) -> &'static str {
        "title"
    }
}

/// Order for a network picker: connected, in range, subscriptions, saved,
/// stronger signal, then title.
#[derive(Debug, Default, Clone, Copy)]
pub struct PickerOrder;

impl EntryOrder for PickerOrder {
    fn compare(&self, a: &NetworkEntry, b: &NetworkEntry) -> Ordering {
        b.is_connected()
            .cmp(&a.is_connected())
            .then_with(|| b.is_in_range().cmp(&a.is_in_range()))
            .then_with(|| b.is_subscription().cmp(&a.is_subscription()))
            .then_with(|| b.is_saved().cmp(&a.is_saved()))
            .then_with(|| b.level().cmp(&a.level()))
            .then_with(|| by_title(a, b))
    }

    fn name(&self) -> &'static str {
        "picker"
    }
}

fn by_title(a: &NetworkEntry, b: &NetworkEntry) -> Ordering {
    a.title()
        .to_lowercase()
        .cmp(&b.title().to_lowercase())
        .then_with(|| a.title().cmp(b.title()))
        .then_with(|| a.identity.cmp(&b.identity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifitrack_api::models::{
        ConfigRecord, ConnectionInfo, NetworkIdentity, ScanData, ScanObservation, SecurityGroup,
    };

    fn entry(ssid: &str, level: Option<i32>) -> NetworkEntry {
        let mut entry = NetworkEntry::new(
            NetworkIdentity::standard(ssid, SecurityGroup::Personal),
            ConfigRecord::Standard { configs: Vec::new() },
        );
        entry.scan = level.map(|level| ScanData {
            observations: vec![ScanObservation {
                ssid: ssid.to_string(),
                bssid: format!("{ssid}-bssid"),
                level,
                frequency_mhz: 2412,
                capabilities: String::new(),
                timestamp_ms: 0,
            }],
            roaming: false,
        });
        entry
    }

    #[test]
    fn test_picker_puts_connected_then_strongest_first() {
        let mut connected = entry("zz", Some(-80));
        connected.connection = Some(ConnectionInfo::default());
        let mut entries = vec![
            entry("aa", None),
            entry("bb", Some(-70)),
            connected,
            entry("cc", Some(-40)),
        ];
        entries.sort_by(|a, b| PickerOrder.compare(a, b));

        let titles: Vec<_> = entries.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["zz", "cc", "bb", "aa"]);
    }

    #[test]
    fn test_same_title_falls_back_to_identity() {
        let personal = entry("Home", None);
        let open = NetworkEntry::new(
            NetworkIdentity::standard("Home", SecurityGroup::Open),
            ConfigRecord::Standard { configs: Vec::new() },
        );
        assert_ne!(TitleOrder.compare(&personal, &open), Ordering::Equal);
        assert_eq!(
            TitleOrder.compare(&personal, &open),
            TitleOrder.compare(&open, &personal).reverse()
        );
    }
}
