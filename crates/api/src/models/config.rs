use serde::{Deserialize, Serialize};

use super::identity::NetworkIdentity;
use super::security::{SecurityGroup, SecurityType};

/// A saved network configuration as listed by the platform store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiConfig {
    pub network_id: i32,
    pub ssid: String,
    pub security_types: Vec<SecurityType>,
    #[serde(default)]
    pub carrier_merged: bool,
    #[serde(default)]
    pub ephemeral: bool,
    #[serde(default)]
    pub from_suggestion: bool,
    /// Set when this configuration backs a Passpoint profile.
    #[serde(default)]
    pub passpoint_unique_id: Option<String>,
}

impl WifiConfig {
    pub fn is_passpoint(&self) -> bool {
        self.passpoint_unique_id.is_some()
    }

    /// Whether the user saved this network, as opposed to a temporary or app-provided one.
    pub fn is_user_saved(&self) -> bool {
        !self.ephemeral && !self.from_suggestion && !self.carrier_merged && !self.is_passpoint()
    }

    pub fn security_group(&self) -> SecurityGroup {
        SecurityGroup::from_types(&self.security_types)
    }

    pub fn identity(&self) -> NetworkIdentity {
        match &self.passpoint_unique_id {
            Some(id) => NetworkIdentity::passpoint(id.clone()),
            None => NetworkIdentity::standard(self.ssid.clone(), self.security_group()),
        }
    }
}

/// A subscription profile. One profile can match many SSIDs over time, so it
/// is keyed by its unique id rather than by SSID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasspointConfig {
    pub unique_id: String,
    pub friendly_name: String,
    #[serde(default)]
    pub fqdn: String,
}

impl PasspointConfig {
    pub fn identity(&self) -> NetworkIdentity {
        NetworkIdentity::passpoint(self.unique_id.clone())
    }
}

/// Configuration attached to a tracked entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigRecord {
    /// Every saved configuration sharing one standard identity.
    Standard { configs: Vec<WifiConfig> },
    Passpoint { profile: PasspointConfig },
}

impl ConfigRecord {
    pub fn is_saved(&self) -> bool {
        match self {
            Self::Standard { configs } => configs.iter().any(WifiConfig::is_user_saved),
            Self::Passpoint { .. } => true,
        }
    }

    pub fn is_passpoint(&self) -> bool {
        matches!(self, Self::Passpoint { .. })
    }

    pub fn network_ids(&self) -> Vec<i32> {
        match self {
            Self::Standard { configs } => configs.iter().map(|c| c.network_id).collect(),
            Self::Passpoint { .. } => Vec::new(),
        }
    }
}
