use std::panic::{AssertUnwindSafe, catch_unwind};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::traits::EventHandler;
use crate::types::{Envelope, WorkerConfig, WorkerRunStats};

/// Drain `rx` into `handler`, one item at a time, until the channel closes or
/// `cancel` fires.
///
/// Handler errors and panics are logged and counted; they never stop the loop.
pub async fn run_worker<E, H>(
    mut rx: mpsc::UnboundedReceiver<Envelope<E>>,
    mut handler: H,
    cancel: CancellationToken,
    config: &WorkerConfig,
) -> WorkerRunStats
where
    E: Send + 'static,
    H: EventHandler<E>,
{
    let mut stats = WorkerRunStats::default();

    loop {
        let envelope = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = rx.recv() => match next {
                Some(envelope) => envelope,
                None => break,
            },
        };

        match envelope {
            Envelope::Barrier(done) => {
                stats.barriers += 1;
                let _ = done.send(());
            }
            Envelope::Event(event) => {
                match catch_unwind(AssertUnwindSafe(|| handler.handle(event))) {
                    Ok(Ok(())) => {
                        stats.handled += 1;
                        if config.verbose {
                            debug!(worker = %config.name, handled = stats.handled, "event handled");
                        }
                    }
                    Ok(Err(e)) => {
                        stats.failed += 1;
                        error!(worker = %config.name, "event rejected: {e}");
                    }
                    Err(_) => {
                        stats.panicked += 1;
                        warn!(worker = %config.name, "event handler panicked; continuing");
                    }
                }
            }
        }
    }

    rx.close();
    handler.on_shutdown();
    debug!(
        worker = %config.name,
        handled = stats.handled,
        failed = stats.failed,
        panicked = stats.panicked,
        "worker stopped"
    );
    stats
}
