pub mod error;
pub mod runtime;
pub mod traits;
pub mod types;

pub use error::WorkerError;
pub use runtime::{WorkerHandle, WorkerRuntime};
pub use traits::EventHandler;
pub use types::{Envelope, WorkerConfig, WorkerRunStats};
