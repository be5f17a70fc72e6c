use serde::{Deserialize, Serialize};

use super::security::SecurityType;

/// Opaque handle the platform assigns to a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkHandle(pub u64);

/// Wi-Fi connection details attached to the capabilities of a Wi-Fi network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiInfo {
    pub ssid: String,
    pub network_id: i32,
    #[serde(default)]
    pub security_type: Option<SecurityType>,
    #[serde(default)]
    pub passpoint_unique_id: Option<String>,
    /// Only one Wi-Fi connection is primary even when several are up.
    pub is_primary: bool,
    #[serde(default)]
    pub rssi: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCapabilities {
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub cellular: bool,
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub wifi_info: Option<WifiInfo>,
}

impl NetworkCapabilities {
    pub fn primary_wifi_info(&self) -> Option<&WifiInfo> {
        self.wifi_info.as_ref().filter(|info| info.is_primary)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkProperties {
    #[serde(default)]
    pub interface_name: String,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub dns_servers: Vec<String>,
}

/// What the platform currently reports for the primary Wi-Fi network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    pub network: NetworkHandle,
    pub capabilities: NetworkCapabilities,
    #[serde(default)]
    pub link_properties: Option<LinkProperties>,
}

/// Radio state as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioState {
    Disabling,
    Disabled,
    Enabling,
    Enabled,
    #[default]
    Unknown,
}

impl RadioState {
    /// Numeric platform code.
    pub fn code(self) -> i32 {
        match self {
            Self::Disabling => 0,
            Self::Disabled => 1,
            Self::Enabling => 2,
            Self::Enabled => 3,
            Self::Unknown => 4,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Disabling,
            1 => Self::Disabled,
            2 => Self::Enabling,
            3 => Self::Enabled,
            _ => Self::Unknown,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}
