//! In-memory platform driven by a replay trace.

use std::sync::Mutex;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use wifitrack_api::models::{
    ConnectionSnapshot, PasspointConfig, RadioState, ScanObservation, Speed, WifiConfig,
};
use wifitrack_api::{PasspointMatch, PlatformResult, ScoreCache, WifiPlatform};

/// A Passpoint match as written in a trace file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpec {
    /// Configuration backing the profile; carries its unique id.
    pub config: WifiConfig,
    #[serde(default)]
    pub home: Vec<ScanObservation>,
    #[serde(default)]
    pub roaming: Vec<ScanObservation>,
}

/// Everything the simulated platform reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimState {
    pub radio: RadioState,
    /// Scan requests are rejected when false.
    pub accept_scans: bool,
    pub scan_results: Vec<ScanObservation>,
    pub configs: Vec<WifiConfig>,
    pub passpoint_configs: Vec<PasspointConfig>,
    pub passpoint_matches: Vec<MatchSpec>,
    pub connection: Option<ConnectionSnapshot>,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            radio: RadioState::Enabled,
            accept_scans: true,
            scan_results: Vec::new(),
            configs: Vec::new(),
            passpoint_configs: Vec::new(),
            passpoint_matches: Vec::new(),
            connection: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SimPlatform {
    state: Mutex<SimState>,
}

impl SimPlatform {
    pub fn new(state: SimState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Apply `change` to the simulated state.
    pub fn update(&self, change: impl FnOnce(&mut SimState)) {
        change(&mut self.state.lock().expect("sim state lock poisoned"));
    }

    fn read<T>(&self, f: impl FnOnce(&SimState) -> T) -> T {
        f(&self.state.lock().expect("sim state lock poisoned"))
    }
}

impl WifiPlatform for SimPlatform {
    fn request_scan(&self) -> bool {
        self.read(|s| s.accept_scans && s.radio.is_enabled())
    }

    fn scan_results(&self) -> PlatformResult<Vec<ScanObservation>> {
        Ok(self.read(|s| s.scan_results.clone()))
    }

    fn radio_state(&self) -> RadioState {
        self.read(|s| s.radio)
    }

    fn configured_networks(&self) -> PlatformResult<Vec<WifiConfig>> {
        Ok(self.read(|s| s.configs.clone()))
    }

    fn passpoint_configs(&self) -> PlatformResult<Vec<PasspointConfig>> {
        Ok(self.read(|s| s.passpoint_configs.clone()))
    }

    fn match_passpoint(
        &self,
        observations: &[ScanObservation],
    ) -> PlatformResult<Vec<PasspointMatch>> {
        let visible = |list: &[ScanObservation]| -> Vec<ScanObservation> {
            observations
                .iter()
                .filter(|o| list.iter().any(|m| m.bssid == o.bssid))
                .cloned()
                .collect()
        };
        Ok(self.read(|s| {
            s.passpoint_matches
                .iter()
                .filter_map(|spec| {
                    let home = visible(&spec.home);
                    let roaming = visible(&spec.roaming);
                    (!home.is_empty() || !roaming.is_empty()).then(|| PasspointMatch {
                        config: spec.config.clone(),
                        home,
                        roaming,
                    })
                })
                .collect()
        }))
    }

    fn current_connection(&self) -> Option<ConnectionSnapshot> {
        self.read(|s| s.connection.clone())
    }
}

/// Score cache whose speeds are set by the trace.
#[derive(Debug, Default)]
pub struct SimScores {
    speeds: Mutex<IndexMap<String, Speed>>,
}

impl SimScores {
    pub fn replace(&self, speeds: IndexMap<String, Speed>) {
        *self.speeds.lock().expect("score lock poisoned") = speeds;
    }
}

impl ScoreCache for SimScores {
    fn speed_for(&self, bssid: &str) -> Option<Speed> {
        self.speeds
            .lock()
            .expect("score lock poisoned")
            .get(bssid)
            .copied()
    }
}
