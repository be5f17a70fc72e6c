/// Failure reported by a platform collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed data from {origin}: {reason}")]
    Malformed {
        origin: &'static str,
        reason: String,
    },
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
