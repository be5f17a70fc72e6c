use std::convert::Infallible;
use std::sync::Arc;

use wifitrack_api::TrackerListener;
use wifitrack_worker::EventHandler;

/// What changed in the last published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    WifiStateChanged,
    SavedEntriesChanged,
    SubscriptionEntriesChanged,
}

/// Runs listener callbacks on the listener worker.
pub(crate) struct NotificationHandler {
    listener: Arc<dyn TrackerListener>,
}

impl NotificationHandler {
    pub(crate) fn new(listener: Arc<dyn TrackerListener>) -> Self {
        Self { listener }
    }
}

impl EventHandler<Notification> for NotificationHandler {
    type Error = Infallible;

    fn handle(&mut self, notification: Notification) -> Result<(), Infallible> {
        match notification {
            Notification::WifiStateChanged => self.listener.on_wifi_state_changed(),
            Notification::SavedEntriesChanged => self.listener.on_saved_entries_changed(),
            Notification::SubscriptionEntriesChanged => {
                self.listener.on_subscription_entries_changed()
            }
        }
        Ok(())
    }
}

/// Listener that ignores every callback.
#[derive(Debug, Default)]
pub struct NoopListener;

impl TrackerListener for NoopListener {}
