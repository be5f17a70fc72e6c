use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::WorkerError;
use crate::traits::EventHandler;
use crate::types::{Envelope, WorkerConfig, WorkerRunStats};

pub mod kernel;

/// Cloneable sender side of a worker. Posting never blocks.
pub struct WorkerHandle<E> {
    tx: mpsc::UnboundedSender<Envelope<E>>,
    name: Arc<str>,
}

impl<E> Clone for WorkerHandle<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            name: Arc::clone(&self.name),
        }
    }
}

impl<E> WorkerHandle<E>
where
    E: Send + 'static,
{
    pub fn post(&self, event: E) -> Result<(), WorkerError> {
        self.tx
            .send(Envelope::Event(event))
            .map_err(|_| WorkerError::Closed(self.name.to_string()))
    }

    /// Wait until every item posted before this call has been handled.
    pub async fn barrier(&self) -> Result<(), WorkerError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Barrier(done_tx))
            .map_err(|_| WorkerError::Closed(self.name.to_string()))?;
        done_rx
            .await
            .map_err(|_| WorkerError::Closed(self.name.to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A single serialized execution context backed by one tokio task.
pub struct WorkerRuntime<E> {
    handle: WorkerHandle<E>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<WorkerRunStats>>>,
}

impl<E> WorkerRuntime<E>
where
    E: Send + 'static,
{
    /// Spawn the worker task on the current tokio runtime.
    pub fn spawn<H>(config: WorkerConfig, handler: H) -> Self
    where
        H: EventHandler<E>,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let name: Arc<str> = Arc::from(config.name.as_str());

        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move { kernel::run_worker(rx, handler, cancel, &config).await })
        };

        Self {
            handle: WorkerHandle { tx, name },
            cancel,
            task: Mutex::new(Some(task)),
        }
    }

    pub fn handle(&self) -> WorkerHandle<E> {
        self.handle.clone()
    }

    /// Stop the worker. Items still queued are dropped.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the worker and wait for its task to finish.
    pub async fn join(&self) -> Result<WorkerRunStats, WorkerError> {
        self.cancel.cancel();
        let task = self
            .task
            .lock()
            .expect("worker task lock poisoned")
            .take()
            .ok_or_else(|| WorkerError::AlreadyJoined(self.handle.name.to_string()))?;
        task.await
            .map_err(|e| WorkerError::Join(format!("worker task join failure: {e}")))
    }
}

impl<E> Drop for WorkerRuntime<E> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
