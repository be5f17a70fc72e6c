use std::sync::{Arc, PoisonError, RwLock};

use wifitrack_api::models::{NetworkEntry, RadioState};

/// Point-in-time view published by the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub saved: Arc<Vec<NetworkEntry>>,
    pub subscriptions: Arc<Vec<NetworkEntry>>,
    pub wifi_state: RadioState,
}

/// Published snapshot behind its own lock.
///
/// The worker swaps in a whole new `Arc` per publish; readers clone the `Arc`
/// and never see a half-written list. A poisoned lock still holds a whole
/// `Arc`, so it is read through.
#[derive(Clone, Default)]
pub(crate) struct SnapshotCell {
    current: Arc<RwLock<Arc<TrackerSnapshot>>>,
}

impl SnapshotCell {
    pub(crate) fn load(&self) -> Arc<TrackerSnapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    pub(crate) fn store(&self, snapshot: TrackerSnapshot) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisoned_cell_still_serves_and_accepts_snapshots() {
        let cell = SnapshotCell::default();
        cell.store(TrackerSnapshot {
            wifi_state: RadioState::Enabled,
            ..TrackerSnapshot::default()
        });

        let poisoner = cell.clone();
        let result = std::thread::spawn(move || {
            let _guard = poisoner.current.write().unwrap();
            panic!("writer died");
        })
        .join();
        assert!(result.is_err());
        assert!(cell.current.is_poisoned());

        assert_eq!(cell.load().wifi_state, RadioState::Enabled);
        cell.store(TrackerSnapshot {
            wifi_state: RadioState::Disabled,
            ..TrackerSnapshot::default()
        });
        assert_eq!(cell.load().wifi_state, RadioState::Disabled);
    }
}
