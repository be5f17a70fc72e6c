use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker {0} is closed")]
    Closed(String),
    #[error("worker {0} already joined")]
    AlreadyJoined(String),
    #[error("join failed: {0}")]
    Join(String),
}
