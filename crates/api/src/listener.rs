/// Change notifications delivered on the listener context.
///
/// Callbacks are best-effort: no return value and no redelivery.
pub trait TrackerListener: Send + Sync {
    fn on_wifi_state_changed(&self) {}

    fn on_saved_entries_changed(&self) {}

    fn on_subscription_entries_changed(&self) {}
}
