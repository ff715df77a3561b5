//! Observer fan-out shared by record store implementations.

use crate::ListingObserver;
use parking_lot::RwLock;
use propcache_core::ListingChange;
use std::sync::Arc;
use tracing::debug;

/// Holds the subscribed observers and delivers changes to them in
/// registration order.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: RwLock<Vec<Arc<dyn ListingObserver>>>,
}

impl ChangeNotifier {
    /// Creates a notifier with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer.
    pub fn subscribe(&self, observer: Arc<dyn ListingObserver>) {
        self.observers.write().push(observer);
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Returns true if no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers a committed change to every observer.
    pub async fn notify(&self, change: ListingChange) {
        // Snapshot the list so the lock is released before any observer awaits.
        let observers = self.observers.read().clone();
        debug!(change = %change, observers = observers.len(), "Dispatching listing change");

        for observer in observers {
            observer.on_change(&change).await;
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.len())
            .finish()
    }
}
