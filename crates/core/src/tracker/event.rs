use wifitrack_api::models::{LinkProperties, NetworkCapabilities, NetworkHandle, RadioState};
use wifitrack_worker::{WorkerError, WorkerHandle};

/// Everything the tracker worker reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    Start,
    Stop,
    RadioStateChanged(RadioState),
    /// `updated` is false when the last scan cycle failed.
    ScanResultsAvailable {
        updated: bool,
    },
    ConfiguredNetworksChanged,
    LinkPropertiesChanged {
        network: NetworkHandle,
        link_properties: LinkProperties,
    },
    CapabilitiesChanged {
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    },
    NetworkLost {
        network: NetworkHandle,
    },
    DefaultCapabilitiesChanged {
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    },
    DefaultNetworkLost,
    ScoreCacheUpdated,
}

impl TrackerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::RadioStateChanged(_) => "radio_state_changed",
            Self::ScanResultsAvailable { .. } => "scan_results_available",
            Self::ConfiguredNetworksChanged => "configured_networks_changed",
            Self::LinkPropertiesChanged { .. } => "link_properties_changed",
            Self::CapabilitiesChanged { .. } => "capabilities_changed",
            Self::NetworkLost { .. } => "network_lost",
            Self::DefaultCapabilitiesChanged { .. } => "default_capabilities_changed",
            Self::DefaultNetworkLost => "default_network_lost",
            Self::ScoreCacheUpdated => "score_cache_updated",
        }
    }
}

/// Cloneable entry point for platform glue to feed events into a tracker.
#[derive(Clone)]
pub struct TrackerEventSink {
    handle: WorkerHandle<TrackerEvent>,
}

impl TrackerEventSink {
    pub(crate) fn new(handle: WorkerHandle<TrackerEvent>) -> Self {
        Self { handle }
    }

    pub fn post(&self, event: TrackerEvent) -> Result<(), WorkerError> {
        self.handle.post(event)
    }

    pub fn radio_state_changed(&self, state: RadioState) -> Result<(), WorkerError> {
        self.post(TrackerEvent::RadioStateChanged(state))
    }

    pub fn scan_results_available(&self, updated: bool) -> Result<(), WorkerError> {
        self.post(TrackerEvent::ScanResultsAvailable { updated })
    }

    pub fn configured_networks_changed(&self) -> Result<(), WorkerError> {
        self.post(TrackerEvent::ConfiguredNetworksChanged)
    }

    pub fn link_properties_changed(
        &self,
        network: NetworkHandle,
        link_properties: LinkProperties,
    ) -> Result<(), WorkerError> {
        self.post(TrackerEvent::LinkPropertiesChanged {
            network,
            link_properties,
        })
    }

    pub fn capabilities_changed(
        &self,
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    ) -> Result<(), WorkerError> {
        self.post(TrackerEvent::CapabilitiesChanged {
            network,
            capabilities,
        })
    }

    pub fn network_lost(&self, network: NetworkHandle) -> Result<(), WorkerError> {
        self.post(TrackerEvent::NetworkLost { network })
    }

    pub fn default_capabilities_changed(
        &self,
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    ) -> Result<(), WorkerError> {
        self.post(TrackerEvent::DefaultCapabilitiesChanged {
            network,
            capabilities,
        })
    }

    pub fn default_network_lost(&self) -> Result<(), WorkerError> {
        self.post(TrackerEvent::DefaultNetworkLost)
    }

    pub fn score_cache_updated(&self) -> Result<(), WorkerError> {
        self.post(TrackerEvent::ScoreCacheUpdated)
    }
}
