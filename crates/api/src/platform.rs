use crate::error::PlatformResult;
use crate::models::{
    ConnectionSnapshot, PasspointConfig, RadioState, ScanObservation, Speed, WifiConfig,
};

/// A Passpoint profile the platform matched against a batch of observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasspointMatch {
    /// Configuration backing the profile; carries its unique id.
    pub config: WifiConfig,
    pub home: Vec<ScanObservation>,
    pub roaming: Vec<ScanObservation>,
}

/// Radio and configuration services the tracker consumes.
///
/// Every call is a bounded, non-blocking query. Scan requests are
/// fire-and-forget: completion arrives later as a scan-results event.
pub trait WifiPlatform: Send + Sync {
    /// Ask the radio to scan. Returns whether the request was accepted.
    fn request_scan(&self) -> bool;

    fn scan_results(&self) -> PlatformResult<Vec<ScanObservation>>;

    fn radio_state(&self) -> RadioState;

    /// Every configuration the store knows about, saved or not.
    fn configured_networks(&self) -> PlatformResult<Vec<WifiConfig>>;

    fn passpoint_configs(&self) -> PlatformResult<Vec<PasspointConfig>>;

    /// Map observations to the Passpoint profiles they satisfy.
    fn match_passpoint(
        &self,
        observations: &[ScanObservation],
    ) -> PlatformResult<Vec<PasspointMatch>>;

    /// Current primary Wi-Fi connection, if any.
    fn current_connection(&self) -> Option<ConnectionSnapshot> {
        None
    }
}

/// Network score collaborator used to derive per-entry speed.
pub trait ScoreCache: Send + Sync {
    fn speed_for(&self, bssid: &str) -> Option<Speed>;
}

/// Score cache that knows nothing.
#[derive(Debug, Default)]
pub struct NoScores;

impl ScoreCache for NoScores {
    fn speed_for(&self, _bssid: &str) -> Option<Speed> {
        None
    }
}
