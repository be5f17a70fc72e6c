//! JSON replay trace format.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use wifitrack_api::models::{
    LinkProperties, NetworkCapabilities, NetworkHandle, PasspointConfig, RadioState,
    ScanObservation, Speed, WifiConfig,
};

use crate::sim::{MatchSpec, SimState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    /// Engine clock at the start of the replay.
    #[serde(default)]
    pub start_ms: u64,
    /// Platform state before the tracker starts.
    #[serde(default)]
    pub initial: SimState,
    #[serde(default)]
    pub scores: IndexMap<String, Speed>,
    pub steps: Vec<Step>,
}

impl Trace {
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn updated_by_default() -> bool {
    true
}

/// One replay step. Steps named `set_*` only change the simulated platform;
/// the others post an event to the tracker (or drive the replay itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Start,
    Stop,
    SetRadio {
        state: RadioState,
    },
    SetScanResults {
        observations: Vec<ScanObservation>,
    },
    ScanResultsAvailable {
        #[serde(default = "updated_by_default")]
        updated: bool,
    },
    SetConfigs {
        configs: Vec<WifiConfig>,
    },
    SetPasspointConfigs {
        configs: Vec<PasspointConfig>,
    },
    SetPasspointMatches {
        matches: Vec<MatchSpec>,
    },
    ConfigsChanged,
    Connect {
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
        #[serde(default)]
        link_properties: Option<LinkProperties>,
    },
    Disconnect {
        network: NetworkHandle,
    },
    DefaultNetwork {
        network: NetworkHandle,
        capabilities: NetworkCapabilities,
    },
    DefaultNetworkLost,
    SetScores {
        scores: IndexMap<String, Speed>,
    },
    ScoresUpdated,
    AdvanceClock {
        ms: u64,
    },
    Print {
        #[serde(default)]
        label: Option<String>,
    },
}
