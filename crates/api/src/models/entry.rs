use serde::{Deserialize, Serialize};

use super::config::{ConfigRecord, WifiConfig};
use super::connectivity::LinkProperties;
use super::identity::NetworkIdentity;
use super::scan::ScanObservation;

/// Estimated throughput bucket derived from the score collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    #[default]
    None,
    Slow,
    Moderate,
    Fast,
    VeryFast,
}

impl Speed {
    pub fn value(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Slow => 5,
            Self::Moderate => 10,
            Self::Fast => 20,
            Self::VeryFast => 30,
        }
    }

    /// Round an averaged speed value to the closest bucket.
    pub fn closest(value: f64) -> Self {
        let slow = f64::from(Self::Slow.value());
        let moderate = f64::from(Self::Moderate.value());
        let fast = f64::from(Self::Fast.value());
        let very_fast = f64::from(Self::VeryFast.value());

        if value < slow {
            Self::None
        } else if value < (slow + moderate) / 2.0 {
            Self::Slow
        } else if value < (moderate + fast) / 2.0 {
            Self::Moderate
        } else if value < (fast + very_fast) / 2.0 {
            Self::Fast
        } else {
            Self::VeryFast
        }
    }
}

/// Observations attached to an entry by the last reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanData {
    /// Reduced observations, strongest first.
    pub observations: Vec<ScanObservation>,
    /// Passpoint only: observations came from a roaming provider.
    #[serde(default)]
    pub roaming: bool,
}

impl ScanData {
    pub fn level(&self) -> Option<i32> {
        self.observations.iter().map(|o| o.level).max()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Live connection state of the entry that matches the primary Wi-Fi network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub validated: bool,
    pub default_route: bool,
    pub cellular_default_route: bool,
    #[serde(default)]
    pub link_properties: Option<LinkProperties>,
}

/// Merged view of one network: configuration joined with live scan state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    pub identity: NetworkIdentity,
    pub config: Option<ConfigRecord>,
    pub scan: Option<ScanData>,
    /// Configuration the platform matched for a Passpoint profile in range.
    #[serde(default)]
    pub matched_config: Option<WifiConfig>,
    #[serde(default)]
    pub speed: Speed,
    #[serde(default)]
    pub connection: Option<ConnectionInfo>,
}

impl NetworkEntry {
    pub fn new(identity: NetworkIdentity, config: ConfigRecord) -> Self {
        Self {
            identity,
            config: Some(config),
            scan: None,
            matched_config: None,
            speed: Speed::None,
            connection: None,
        }
    }

    /// SSID for standard entries, provider name for Passpoint entries.
    pub fn title(&self) -> &str {
        match (&self.config, &self.identity) {
            (Some(ConfigRecord::Passpoint { profile }), _) => &profile.friendly_name,
            (_, NetworkIdentity::Standard { ssid, .. }) => ssid,
            (_, NetworkIdentity::Passpoint { profile_id }) => profile_id,
        }
    }

    pub fn level(&self) -> Option<i32> {
        self.scan.as_ref().and_then(ScanData::level)
    }

    pub fn is_in_range(&self) -> bool {
        self.scan.as_ref().is_some_and(|s| !s.is_empty())
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn is_saved(&self) -> bool {
        self.config.as_ref().is_some_and(ConfigRecord::is_saved)
    }

    pub fn is_subscription(&self) -> bool {
        self.config.as_ref().is_some_and(ConfigRecord::is_passpoint)
    }

    /// Bssids of the attached observations.
    pub fn bssids(&self) -> impl Iterator<Item = &str> {
        self.scan
            .iter()
            .flat_map(|s| s.observations.iter().map(|o| o.bssid.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_rounding_buckets() {
        assert_eq!(Speed::closest(0.0), Speed::None);
        assert_eq!(Speed::closest(4.9), Speed::None);
        assert_eq!(Speed::closest(5.0), Speed::Slow);
        assert_eq!(Speed::closest(7.4), Speed::Slow);
        assert_eq!(Speed::closest(7.5), Speed::Moderate);
        assert_eq!(Speed::closest(15.0), Speed::Fast);
        assert_eq!(Speed::closest(24.9), Speed::Fast);
        assert_eq!(Speed::closest(25.0), Speed::VeryFast);
    }
}
