use serde::{Deserialize, Serialize};

use super::identity::NetworkIdentity;
use super::security::{SecurityGroup, SecurityType, security_types_from_capabilities};

/// One timestamped sighting of an access point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanObservation {
    pub ssid: String,
    pub bssid: String,
    /// Signal level in dBm.
    pub level: i32,
    #[serde(default)]
    pub frequency_mhz: u32,
    /// Raw capability string as reported by the radio.
    #[serde(default)]
    pub capabilities: String,
    /// Observation time in milliseconds on the engine clock.
    pub timestamp_ms: u64,
}

impl ScanObservation {
    pub fn security_types(&self) -> Vec<SecurityType> {
        security_types_from_capabilities(&self.capabilities)
    }

    /// Standard identities this observation can satisfy.
    ///
    /// An access point advertising several security families yields one
    /// identity per family; hidden (empty SSID) access points yield none.
    pub fn identities(&self) -> Vec<NetworkIdentity> {
        if self.ssid.is_empty() {
            return Vec::new();
        }
        let types = self.security_types();
        if types.is_empty() {
            return vec![NetworkIdentity::standard(self.ssid.clone(), SecurityGroup::Unknown)];
        }

        let mut groups = vec![SecurityGroup::from_types(&types)];
        for ty in &types {
            let group = ty.group();
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
            .into_iter()
            .map(|group| NetworkIdentity::standard(self.ssid.clone(), group))
            .collect()
    }

    /// Age of this observation at `now_ms`; observations from the future are age zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(ssid: &str, caps: &str) -> ScanObservation {
        ScanObservation {
            ssid: ssid.to_string(),
            bssid: "00:11:22:33:44:55".to_string(),
            level: -60,
            frequency_mhz: 2412,
            capabilities: caps.to_string(),
            timestamp_ms: 100,
        }
    }

    #[test]
    fn test_transition_network_maps_to_single_identity() {
        let obs = observation("Home", "[RSN-PSK+SAE-CCMP][ESS]");
        assert_eq!(
            obs.identities(),
            vec![NetworkIdentity::standard("Home", SecurityGroup::Personal)]
        );
    }

    #[test]
    fn test_hidden_network_has_no_identity() {
        assert!(observation("", "[ESS]").identities().is_empty());
    }

    #[test]
    fn test_future_observation_is_age_zero() {
        let obs = observation("Home", "[ESS]");
        assert_eq!(obs.age_ms(50), 0);
        assert_eq!(obs.age_ms(160), 60);
    }
}
