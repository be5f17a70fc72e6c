pub mod clock;
pub mod config_store;
pub mod connectivity;
pub mod error;
pub mod logging;
pub mod order;
pub mod reconcile;
pub mod scan_cache;
pub mod scheduler;
pub mod score;
pub mod settings;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TrackerError};
pub use settings::TrackerSettings;
pub use tracker::{
    SavedNetworksVariant, TrackerEvent, TrackerEventSink, TrackerSnapshot, TrackerVariant,
    WifiTracker, WifiTrackerBuilder,
};
