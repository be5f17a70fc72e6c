/// Consumer of one serialized event stream.
///
/// The runtime owns the handler by value and calls it from a single task, so
/// implementations keep their state in plain fields without locking.
pub trait EventHandler<E>: Send + 'static {
    type Error: std::fmt::Display + Send;

    fn handle(&mut self, event: E) -> Result<(), Self::Error>;

    /// Called once after the last event, when the runtime shuts down.
    fn on_shutdown(&mut self) {}
}
