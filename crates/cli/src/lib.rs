pub mod replay;
pub mod sim;
pub mod trace;
pub mod view;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wifitrack_core::TrackerSettings;

#[derive(Parser)]
#[command(
    name = "wifitrack",
    version,
    about = "Replay Wi-Fi tracker traces against a simulated platform",
    long_about = "wifitrack drives the network tracker engine from a JSON trace of platform \
                  changes and events, and prints the saved and subscription entry lists it \
                  publishes along the way."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON trace and print the published snapshots
    Replay {
        /// Path to the trace file
        #[arg(value_name = "TRACE")]
        trace: PathBuf,

        /// Tracker settings (JSON). Defaults apply when omitted.
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// Do not log to stderr
        #[arg(long)]
        quiet: bool,
    },
    /// Validate a tracker settings file and show the effective values
    CheckSettings {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            trace,
            settings,
            quiet,
        } => {
            let _guard = wifitrack_core::logging::init_logging("replay", !quiet);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(replay::run(trace, settings))
        }
        Commands::CheckSettings { file } => {
            let settings = TrackerSettings::from_json_file(&file)?;
            println!("{}", view::render_settings(&settings));
            Ok(())
        }
    }
}
