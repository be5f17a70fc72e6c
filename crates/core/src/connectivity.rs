//! Validated and default-route state of the primary Wi-Fi network.

use wifitrack_api::models::{
    ConfigRecord, ConnectionInfo, ConnectionSnapshot, LinkProperties, NetworkCapabilities,
    NetworkEntry, NetworkHandle, NetworkIdentity, WifiInfo,
};

use crate::config_store::EntryTable;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PrimaryNetwork {
    network: NetworkHandle,
    info: WifiInfo,
    validated: bool,
    link_properties: Option<LinkProperties>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DefaultNetwork {
    network: NetworkHandle,
    capabilities: NetworkCapabilities,
}

/// Everything a caller can observe; compared before and after each event.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Observed {
    primary: Option<PrimaryNetwork>,
    validated: bool,
    wifi_default_route: bool,
    cellular_default_route: bool,
}

/// Folds connectivity callbacks into three booleans plus the primary connection.
///
/// Every `on_*` method returns whether observable state changed.
#[derive(Debug, Default)]
pub struct ConnectivityTracker {
    primary: Option<PrimaryNetwork>,
    default: Option<DefaultNetwork>,
}

impl ConnectivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_capabilities_changed(
        &mut self,
        network: NetworkHandle,
        capabilities: &NetworkCapabilities,
    ) -> bool {
        self.track(|this| {
            if let Some(info) = &capabilities.wifi_info {
                if !info.is_primary {
                    return;
                }
                let link_properties = this
                    .primary
                    .as_ref()
                    .filter(|p| p.network == network)
                    .and_then(|p| p.link_properties.clone());
                this.primary = Some(PrimaryNetwork {
                    network,
                    info: info.clone(),
                    validated: capabilities.validated,
                    link_properties,
                });
            } else if let Some(primary) = this.primary.as_mut().filter(|p| p.network == network) {
                primary.validated = capabilities.validated;
            }
        })
    }

    pub fn on_link_properties_changed(
        &mut self,
        network: NetworkHandle,
        link_properties: &LinkProperties,
    ) -> bool {
        self.track(|this| {
            if let Some(primary) = this.primary.as_mut().filter(|p| p.network == network) {
                primary.link_properties = Some(link_properties.clone());
            }
        })
    }

    pub fn on_network_lost(&mut self, network: NetworkHandle) -> bool {
        self.track(|this| {
            if this.primary.as_ref().is_some_and(|p| p.network == network) {
                this.primary = None;
            }
        })
    }

    pub fn on_default_capabilities_changed(
        &mut self,
        network: NetworkHandle,
        capabilities: &NetworkCapabilities,
    ) -> bool {
        self.track(|this| {
            this.default = Some(DefaultNetwork {
                network,
                capabilities: capabilities.clone(),
            });
        })
    }

    pub fn on_default_network_lost(&mut self) -> bool {
        self.track(|this| this.default = None)
    }

    /// Adopt the connection the platform reports at start-up.
    pub fn seed(&mut self, snapshot: &ConnectionSnapshot) -> bool {
        let mut changed = self.on_capabilities_changed(snapshot.network, &snapshot.capabilities);
        if let Some(link_properties) = &snapshot.link_properties {
            changed |= self.on_link_properties_changed(snapshot.network, link_properties);
        }
        changed
    }

    pub fn reset(&mut self) {
        self.primary = None;
        self.default = None;
    }

    pub fn is_validated(&self) -> bool {
        self.primary.as_ref().is_some_and(|p| p.validated)
    }

    pub fn is_wifi_default_route(&self) -> bool {
        let (Some(primary), Some(default)) = (&self.primary, &self.default) else {
            return false;
        };
        default.network == primary.network || default.capabilities.primary_wifi_info().is_some()
    }

    pub fn is_cellular_default_route(&self) -> bool {
        self.default
            .as_ref()
            .is_some_and(|d| d.capabilities.cellular && !d.capabilities.wifi)
    }

    pub fn primary_network(&self) -> Option<NetworkHandle> {
        self.primary.as_ref().map(|p| p.network)
    }

    pub fn primary_info(&self) -> Option<&WifiInfo> {
        self.primary.as_ref().map(|p| &p.info)
    }

    pub fn connection_info(&self) -> Option<ConnectionInfo> {
        let primary = self.primary.as_ref()?;
        Some(ConnectionInfo {
            validated: primary.validated,
            default_route: self.is_wifi_default_route(),
            cellular_default_route: self.is_cellular_default_route(),
            link_properties: primary.link_properties.clone(),
        })
    }

    /// Set the connection of the entry matching the primary network, clear all others.
    ///
    /// Standard entries match by network id first; SSID plus security group is
    /// only consulted when no entry carries the connected network id.
    pub fn apply_to(&self, table: &mut EntryTable) -> bool {
        let info = self.connection_info();
        let target = self.primary_info().and_then(|primary| {
            table
                .values()
                .find(|entry| matches_by_id(entry, primary))
                .or_else(|| table.values().find(|entry| matches_by_ssid(entry, primary)))
                .map(|entry| entry.identity.clone())
        });

        let mut changed = false;
        for (identity, entry) in table.iter_mut() {
            let connection = if target.as_ref() == Some(identity) {
                info.clone()
            } else {
                None
            };
            if entry.connection != connection {
                entry.connection = connection;
                changed = true;
            }
        }
        changed
    }

    fn observed(&self) -> Observed {
        Observed {
            primary: self.primary.clone(),
            validated: self.is_validated(),
            wifi_default_route: self.is_wifi_default_route(),
            cellular_default_route: self.is_cellular_default_route(),
        }
    }

    fn track(&mut self, apply: impl FnOnce(&mut Self)) -> bool {
        let before = self.observed();
        apply(self);
        before != self.observed()
    }
}

fn matches_by_id(entry: &NetworkEntry, info: &WifiInfo) -> bool {
    match (&entry.config, &info.passpoint_unique_id) {
        (Some(ConfigRecord::Passpoint { profile }), Some(id)) => &profile.unique_id == id,
        (Some(ConfigRecord::Standard { configs }), None) => {
            configs.iter().any(|c| c.network_id == info.network_id)
        }
        _ => false,
    }
}

fn matches_by_ssid(entry: &NetworkEntry, info: &WifiInfo) -> bool {
    if info.passpoint_unique_id.is_some() {
        return false;
    }
    match &entry.identity {
        NetworkIdentity::Standard { ssid, security } => {
            ssid == &info.ssid && info.security_type.is_none_or(|t| t.group() == *security)
        }
        NetworkIdentity::Passpoint { .. } => false,
    }
}
