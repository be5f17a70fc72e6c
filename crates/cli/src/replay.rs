use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use wifitrack_core::{Clock, ManualClock, TrackerSettings, WifiTracker};

use crate::sim::{SimPlatform, SimScores};
use crate::trace::{Step, Trace};
use crate::view::render_snapshot;

pub async fn run(
    trace_path: PathBuf,
    settings_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match settings_path {
        Some(path) => TrackerSettings::from_json_file(&path)?,
        None => TrackerSettings::default(),
    };
    let trace = Trace::from_file(&trace_path)?;
    info!(
        "Replaying {} ({} steps)",
        trace_path.display(),
        trace.steps.len()
    );

    let output = replay(trace, settings).await?;
    print!("{output}");
    Ok(())
}

/// Drive a tracker through `trace` and return the rendered snapshots.
pub async fn replay(
    trace: Trace,
    settings: TrackerSettings,
) -> Result<String, Box<dyn std::error::Error>> {
    let platform = Arc::new(SimPlatform::new(trace.initial));
    let clock = Arc::new(ManualClock::new(trace.start_ms));
    let scores = Arc::new(SimScores::default());
    scores.replace(trace.scores);

    let tracker = WifiTracker::builder(platform.clone())
        .settings(settings)
        .clock(clock.clone())
        .scores(scores.clone())
        .build()?;
    let sink = tracker.event_sink();
    tracker.start()?;

    let mut out = String::new();
    let mut printed_last = false;
    for step in trace.steps {
        printed_last = false;
        match step {
            Step::Start => tracker.start()?,
            Step::Stop => tracker.stop()?,
            Step::SetRadio { state } => {
                platform.update(|s| s.radio = state);
                sink.radio_state_changed(state)?;
            }
            Step::SetScanResults { observations } => {
                platform.update(|s| s.scan_results = observations);
            }
            Step::ScanResultsAvailable { updated } => sink.scan_results_available(updated)?,
            Step::SetConfigs { configs } => platform.update(|s| s.configs = configs),
            Step::SetPasspointConfigs { configs } => {
                platform.update(|s| s.passpoint_configs = configs);
            }
            Step::SetPasspointMatches { matches } => {
                platform.update(|s| s.passpoint_matches = matches);
            }
            Step::ConfigsChanged => sink.configured_networks_changed()?,
            Step::Connect {
                network,
                capabilities,
                link_properties,
            } => {
                platform.update(|s| {
                    s.connection = Some(wifitrack_api::models::ConnectionSnapshot {
                        network,
                        capabilities: capabilities.clone(),
                        link_properties: link_properties.clone(),
                    })
                });
                sink.capabilities_changed(network, capabilities)?;
                if let Some(link_properties) = link_properties {
                    sink.link_properties_changed(network, link_properties)?;
                }
            }
            Step::Disconnect { network } => {
                platform.update(|s| s.connection = None);
                sink.network_lost(network)?;
            }
            Step::DefaultNetwork {
                network,
                capabilities,
            } => sink.default_capabilities_changed(network, capabilities)?,
            Step::DefaultNetworkLost => sink.default_network_lost()?,
            Step::SetScores { scores: speeds } => scores.replace(speeds),
            Step::ScoresUpdated => sink.score_cache_updated()?,
            Step::AdvanceClock { ms } => {
                // Events already queued are handled at the time they were posted.
                tracker.flush().await?;
                clock.advance(ms);
            }
            Step::Print { label } => {
                tracker.flush().await?;
                let label = label.unwrap_or_else(|| "snapshot".to_string());
                out.push_str(&render_snapshot(&label, clock.now_ms(), &tracker.snapshot()));
                printed_last = true;
            }
        }
    }

    tracker.flush().await?;
    if !printed_last {
        out.push_str(&render_snapshot("final", clock.now_ms(), &tracker.snapshot()));
    }
    tracker.shutdown().await?;
    Ok(out)
}
