use serde::{Deserialize, Serialize};
use std::fmt;

use super::security::SecurityGroup;

/// Stable join key for one logical network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkIdentity {
    /// Saved network matched by SSID and security family.
    Standard { ssid: String, security: SecurityGroup },
    /// Subscription network matched by its provider profile.
    Passpoint { profile_id: String },
}

impl NetworkIdentity {
    pub fn standard(ssid: impl Into<String>, security: SecurityGroup) -> Self {
        Self::Standard {
            ssid: ssid.into(),
            security,
        }
    }

    pub fn passpoint(profile_id: impl Into<String>) -> Self {
        Self::Passpoint {
            profile_id: profile_id.into(),
        }
    }

    pub fn is_passpoint(&self) -> bool {
        matches!(self, Self::Passpoint { .. })
    }

    /// String key used in logs and as the final tie-breaker when ordering entries.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NetworkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard { ssid, security } => write!(f, "StandardWifiEntry:{ssid},{security}"),
            Self::Passpoint { profile_id } => write!(f, "PasspointWifiEntry:{profile_id}"),
        }
    }
}
