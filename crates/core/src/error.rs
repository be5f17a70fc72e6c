use thiserror::Error;
use wifitrack_api::PlatformError;
use wifitrack_worker::WorkerError;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid settings: {0}")]
    Settings(String),
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
