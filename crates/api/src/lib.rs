pub mod error;
pub mod listener;
pub mod models;
pub mod platform;

// Re-export commonly used types
pub use error::{PlatformError, PlatformResult};
pub use listener::TrackerListener;
pub use models::*;
pub use platform::{NoScores, PasspointMatch, ScoreCache, WifiPlatform};
