//! Fixed-interval scan requests with a bounded retry count.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use wifitrack_api::WifiPlatform;

use crate::settings::TrackerSettings;

/// Issues a scan request immediately and then once per interval until stopped.
///
/// A rejected request bumps the retry counter. Once the counter reaches the
/// limit the scheduler gives up on the current cycle, resets the counter and
/// keeps going at the same interval.
pub struct ScanScheduler {
    platform: Arc<dyn WifiPlatform>,
    interval: Duration,
    retry_limit: u32,
    verbose: bool,
    run: Mutex<Option<ScanRun>>,
}

/// One start..stop cycle. Each run counts its own failures, so a task still
/// finishing a request after `stop()` cannot leak into the next run.
struct ScanRun {
    token: CancellationToken,
    retries: Arc<AtomicU32>,
}

impl ScanScheduler {
    pub fn new(platform: Arc<dyn WifiPlatform>, settings: &TrackerSettings) -> Self {
        Self {
            platform,
            interval: settings.scan_interval(),
            retry_limit: settings.scan_retry_limit,
            verbose: settings.verbose_logging,
            run: Mutex::new(None),
        }
    }

    /// Start scanning on the current tokio runtime. Returns false if already running.
    pub fn start(&self) -> bool {
        let mut slot = self.run.lock().expect("scheduler lock poisoned");
        if slot.as_ref().is_some_and(|run| !run.token.is_cancelled()) {
            return false;
        }

        let token = CancellationToken::new();
        let retries = Arc::new(AtomicU32::new(0));
        *slot = Some(ScanRun {
            token: token.clone(),
            retries: Arc::clone(&retries),
        });

        let platform = Arc::clone(&self.platform);
        let interval = self.interval;
        let retry_limit = self.retry_limit;
        let verbose = self.verbose;
        tokio::spawn(async move {
            loop {
                if token.is_cancelled() {
                    break;
                }
                request_once(platform.as_ref(), &retries, retry_limit, verbose);

                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        info!("Scan scheduler started (interval {:?})", self.interval);
        true
    }

    /// Cancel pending requests. The next `start()` begins with a zero retry count.
    pub fn stop(&self) {
        let run = self.run.lock().expect("scheduler lock poisoned").take();
        if let Some(run) = run {
            run.token.cancel();
            info!("Scan scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.run
            .lock()
            .expect("scheduler lock poisoned")
            .as_ref()
            .is_some_and(|run| !run.token.is_cancelled())
    }

    /// Failed requests in the current cycle of the current run.
    pub fn retry_count(&self) -> u32 {
        self.run
            .lock()
            .expect("scheduler lock poisoned")
            .as_ref()
            .map_or(0, |run| run.retries.load(Ordering::SeqCst))
    }
}

impl Drop for ScanScheduler {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.run.lock() {
            if let Some(run) = slot.take() {
                run.token.cancel();
            }
        }
    }
}

fn request_once(platform: &dyn WifiPlatform, retries: &AtomicU32, retry_limit: u32, verbose: bool) {
    if platform.request_scan() {
        retries.store(0, Ordering::SeqCst);
        return;
    }

    let attempts = retries.fetch_add(1, Ordering::SeqCst) + 1;
    if attempts >= retry_limit {
        retries.store(0, Ordering::SeqCst);
        if verbose {
            debug!("Scan request rejected {attempts} times; giving up until next interval");
        }
    } else if verbose {
        debug!("Scan request rejected (attempt {attempts}/{retry_limit})");
    }
}
