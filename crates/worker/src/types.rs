use tokio::sync::oneshot;

/// Item carried by a worker channel.
#[derive(Debug)]
pub enum Envelope<E> {
    Event(E),
    /// Resolved once every item queued before it has been handled.
    Barrier(oneshot::Sender<()>),
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Name used in logs.
    pub name: String,
    /// Log every handled event at debug level.
    pub verbose: bool,
}

impl WorkerConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "worker".to_string(),
            verbose: false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerRunStats {
    pub handled: usize,
    pub failed: usize,
    pub panicked: usize,
    pub barriers: usize,
}
