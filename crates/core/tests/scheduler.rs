mod common;

use std::sync::Arc;
use std::time::Duration;

use common::FakePlatform;
use wifitrack_core::TrackerSettings;
use wifitrack_core::scheduler::ScanScheduler;

const INTERVAL: Duration = Duration::from_millis(10_000);

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn scheduler(platform: Arc<FakePlatform>) -> ScanScheduler {
    ScanScheduler::new(platform, &TrackerSettings::default())
}

#[tokio::test(start_paused = true)]
async fn test_first_request_is_immediate_and_start_is_idempotent() {
    let platform = FakePlatform::enabled();
    let scheduler = scheduler(platform.clone());

    assert!(scheduler.start());
    assert!(!scheduler.start());
    settle().await;
    assert_eq!(platform.scan_requests(), 1);
    assert!(scheduler.is_running());

    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(platform.scan_requests(), 2);
    assert_eq!(scheduler.retry_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_after_three_failures_then_waits_an_interval() {
    let platform = FakePlatform::enabled();
    platform.set_accept_scans(false);
    let scheduler = scheduler(platform.clone());

    scheduler.start();
    settle().await;
    assert_eq!(scheduler.retry_count(), 1);

    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(scheduler.retry_count(), 2);

    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(platform.scan_requests(), 3);
    assert_eq!(scheduler.retry_count(), 0);

    tokio::time::advance(INTERVAL - Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(platform.scan_requests(), 3);

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(platform.scan_requests(), 4);
    assert_eq!(scheduler.retry_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_success_resets_retry_count() {
    let platform = FakePlatform::enabled();
    platform.set_accept_scans(false);
    let scheduler = scheduler(platform.clone());

    scheduler.start();
    settle().await;
    assert_eq!(scheduler.retry_count(), 1);

    platform.set_accept_scans(true);
    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(scheduler.retry_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_pending_requests() {
    let platform = FakePlatform::enabled();
    platform.set_accept_scans(false);
    let scheduler = scheduler(platform.clone());

    scheduler.start();
    settle().await;
    scheduler.stop();
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.retry_count(), 0);

    tokio::time::advance(INTERVAL * 3).await;
    settle().await;
    assert_eq!(platform.scan_requests(), 1);

    assert!(scheduler.start());
    settle().await;
    assert_eq!(platform.scan_requests(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_restart_gets_a_full_retry_budget() {
    let platform = FakePlatform::enabled();
    platform.set_accept_scans(false);
    let scheduler = scheduler(platform.clone());

    scheduler.start();
    settle().await;
    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(scheduler.retry_count(), 2);

    scheduler.stop();
    assert!(scheduler.start());
    settle().await;
    assert_eq!(platform.scan_requests(), 3);
    assert_eq!(scheduler.retry_count(), 1);

    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(scheduler.retry_count(), 2);

    tokio::time::advance(INTERVAL).await;
    settle().await;
    assert_eq!(scheduler.retry_count(), 0);
}
