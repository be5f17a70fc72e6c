#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wifitrack_api::models::{
    ConnectionSnapshot, PasspointConfig, RadioState, ScanObservation, SecurityType, Speed,
    WifiConfig,
};
use wifitrack_api::{
    PasspointMatch, PlatformError, PlatformResult, ScoreCache, TrackerListener, WifiPlatform,
};

#[derive(Default)]
struct FakeState {
    radio: RadioState,
    accept_scans: bool,
    scans: Vec<ScanObservation>,
    configs: Vec<WifiConfig>,
    passpoint: Vec<PasspointConfig>,
    matches: Vec<PasspointMatch>,
    connection: Option<ConnectionSnapshot>,
    fail_listings: bool,
}

/// In-memory platform driven by the test.
#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<FakeState>,
    pub scan_requests: AtomicUsize,
    pub config_reads: AtomicUsize,
}

impl FakePlatform {
    pub fn enabled() -> Arc<Self> {
        let platform = Self::default();
        {
            let mut state = platform.state.lock().unwrap();
            state.radio = RadioState::Enabled;
            state.accept_scans = true;
        }
        Arc::new(platform)
    }

    pub fn set_radio(&self, radio: RadioState) {
        self.state.lock().unwrap().radio = radio;
    }

    pub fn set_accept_scans(&self, accept: bool) {
        self.state.lock().unwrap().accept_scans = accept;
    }

    pub fn set_scans(&self, scans: Vec<ScanObservation>) {
        self.state.lock().unwrap().scans = scans;
    }

    pub fn set_configs(&self, configs: Vec<WifiConfig>) {
        self.state.lock().unwrap().configs = configs;
    }

    pub fn set_passpoint(&self, configs: Vec<PasspointConfig>) {
        self.state.lock().unwrap().passpoint = configs;
    }

    pub fn set_matches(&self, matches: Vec<PasspointMatch>) {
        self.state.lock().unwrap().matches = matches;
    }

    pub fn set_connection(&self, connection: Option<ConnectionSnapshot>) {
        self.state.lock().unwrap().connection = connection;
    }

    pub fn set_fail_listings(&self, fail: bool) {
        self.state.lock().unwrap().fail_listings = fail;
    }

    pub fn scan_requests(&self) -> usize {
        self.scan_requests.load(Ordering::SeqCst)
    }

    pub fn config_reads(&self) -> usize {
        self.config_reads.load(Ordering::SeqCst)
    }
}

impl WifiPlatform for FakePlatform {
    fn request_scan(&self) -> bool {
        self.scan_requests.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().accept_scans
    }

    fn scan_results(&self) -> PlatformResult<Vec<ScanObservation>> {
        let state = self.state.lock().unwrap();
        if state.fail_listings {
            return Err(PlatformError::Unavailable("scan results".to_string()));
        }
        Ok(state.scans.clone())
    }

    fn radio_state(&self) -> RadioState {
        self.state.lock().unwrap().radio
    }

    fn configured_networks(&self) -> PlatformResult<Vec<WifiConfig>> {
        self.config_reads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        if state.fail_listings {
            return Err(PlatformError::Unavailable("configured networks".to_string()));
        }
        Ok(state.configs.clone())
    }

    fn passpoint_configs(&self) -> PlatformResult<Vec<PasspointConfig>> {
        let state = self.state.lock().unwrap();
        if state.fail_listings {
            return Err(PlatformError::Unavailable("passpoint configs".to_string()));
        }
        Ok(state.passpoint.clone())
    }

    // Only observations present in the batch survive, like a real matcher.
    fn match_passpoint(
        &self,
        observations: &[ScanObservation],
    ) -> PlatformResult<Vec<PasspointMatch>> {
        let visible = |list: &[ScanObservation]| -> Vec<ScanObservation> {
            list.iter()
                .filter(|o| observations.iter().any(|seen| seen.bssid == o.bssid))
                .cloned()
                .collect()
        };
        let state = self.state.lock().unwrap();
        Ok(state
            .matches
            .iter()
            .map(|m| PasspointMatch {
                config: m.config.clone(),
                home: visible(&m.home),
                roaming: visible(&m.roaming),
            })
            .filter(|m| !m.home.is_empty() || !m.roaming.is_empty())
            .collect())
    }

    fn current_connection(&self) -> Option<ConnectionSnapshot> {
        self.state.lock().unwrap().connection.clone()
    }
}

#[derive(Default)]
pub struct RecordingListener {
    pub wifi_state: AtomicUsize,
    pub saved: AtomicUsize,
    pub subscriptions: AtomicUsize,
}

impl RecordingListener {
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.wifi_state.load(Ordering::SeqCst),
            self.saved.load(Ordering::SeqCst),
            self.subscriptions.load(Ordering::SeqCst),
        )
    }
}

impl TrackerListener for RecordingListener {
    fn on_wifi_state_changed(&self) {
        self.wifi_state.fetch_add(1, Ordering::SeqCst);
    }

    fn on_saved_entries_changed(&self) {
        self.saved.fetch_add(1, Ordering::SeqCst);
    }

    fn on_subscription_entries_changed(&self) {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct MapScores(pub Mutex<HashMap<String, Speed>>);

impl ScoreCache for MapScores {
    fn speed_for(&self, bssid: &str) -> Option<Speed> {
        self.0.lock().unwrap().get(bssid).copied()
    }
}

pub fn psk_config(network_id: i32, ssid: &str) -> WifiConfig {
    WifiConfig {
        network_id,
        ssid: ssid.to_string(),
        security_types: vec![SecurityType::Psk],
        carrier_merged: false,
        ephemeral: false,
        from_suggestion: false,
        passpoint_unique_id: None,
    }
}

pub fn psk_scan(ssid: &str, bssid: &str, level: i32, timestamp_ms: u64) -> ScanObservation {
    ScanObservation {
        ssid: ssid.to_string(),
        bssid: bssid.to_string(),
        level,
        frequency_mhz: 2437,
        capabilities: "[WPA2-PSK-CCMP][RSN-PSK-CCMP][ESS]".to_string(),
        timestamp_ms,
    }
}

pub fn eap_scan(ssid: &str, bssid: &str, level: i32, timestamp_ms: u64) -> ScanObservation {
    ScanObservation {
        capabilities: "[RSN-EAP/SHA1-CCMP][ESS]".to_string(),
        ..psk_scan(ssid, bssid, level, timestamp_ms)
    }
}
