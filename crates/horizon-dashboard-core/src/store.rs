//! Store change notification.
//!
//! Stores hold state shared by many independent views (issue groups, the
//! current selection). A store owns a [`Notifier`] and calls
//! [`Notifier::notify`] with the set of records that changed; views call
//! [`Notifier::subscribe`] with a predicate so they only wake up for changes
//! affecting their own identity.
//!
//! Stores are handed to views explicitly (usually as `Arc<Store>`); there is
//! no process-wide registry.
//!
//! # Example
//!
//! ```
//! use horizon_dashboard_core::store::{ChangeSet, Notifier};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let notifier = Notifier::<String>::new();
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let hits_clone = hits.clone();
//! let subscription = notifier.subscribe(
//!     |changes: &ChangeSet<String>| changes.affects(&"42".to_string()),
//!     move |_| {
//!         hits_clone.fetch_add(1, Ordering::SeqCst);
//!     },
//! );
//!
//! notifier.notify(ChangeSet::items(["7".to_string()]));
//! notifier.notify(ChangeSet::items(["42".to_string()]));
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//!
//! drop(subscription);
//! notifier.notify(ChangeSet::All);
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use crate::logging::targets;
use crate::signal::{ConnectionGuard, Signal};

/// The records touched by one store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSet<K: Eq + Hash> {
    /// Every record may have changed (bulk operations, resets).
    All,
    /// Only the listed records changed.
    Items(HashSet<K>),
}

impl<K: Eq + Hash> ChangeSet<K> {
    /// Build a change set from an iterator of keys.
    pub fn items(keys: impl IntoIterator<Item = K>) -> Self {
        Self::Items(keys.into_iter().collect())
    }

    /// Returns `true` if `key` is covered by this change set.
    pub fn affects(&self, key: &K) -> bool {
        match self {
            Self::All => true,
            Self::Items(keys) => keys.contains(key),
        }
    }

    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Items(keys) if keys.is_empty())
    }
}

/// Handle for an active store subscription.
///
/// The subscription is released when the handle is dropped, which ties a
/// view's interest in the store to the view's own lifetime.
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    guard: ConnectionGuard,
}

impl Subscription {
    /// Release the subscription now.
    pub fn unsubscribe(self) {
        self.guard.disconnect();
    }
}

/// Broadcasts [`ChangeSet`]s to predicate-filtered subscribers.
pub struct Notifier<K: Eq + Hash> {
    changed: Signal<ChangeSet<K>>,
}

impl<K: Eq + Hash + Send + Sync + 'static> Default for Notifier<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Send + Sync + 'static> Notifier<K> {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self {
            changed: Signal::new(),
        }
    }

    /// Subscribe to changes for which `predicate` returns `true`.
    pub fn subscribe<P, F>(&self, predicate: P, callback: F) -> Subscription
    where
        P: Fn(&ChangeSet<K>) -> bool + Send + Sync + 'static,
        F: Fn(&ChangeSet<K>) + Send + Sync + 'static,
    {
        let guard = self.changed.connect_scoped(move |changes| {
            if predicate(changes) {
                callback(changes);
            }
        });
        Subscription { guard }
    }

    /// Subscribe to every change.
    pub fn subscribe_all<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeSet<K>) + Send + Sync + 'static,
    {
        self.subscribe(|_| true, callback)
    }

    /// Deliver a change set to all matching subscribers.
    ///
    /// Empty change sets are dropped.
    pub fn notify(&self, changes: ChangeSet<K>) {
        if changes.is_empty() {
            return;
        }
        tracing::trace!(
            target: targets::STORE,
            subscribers = self.changed.connection_count(),
            "notifying store subscribers"
        );
        self.changed.emit(changes);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.changed.connection_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_change_set_affects() {
        let changes = ChangeSet::items(["a", "b"]);
        assert!(changes.affects(&"a"));
        assert!(!changes.affects(&"c"));
        assert!(ChangeSet::<&str>::All.affects(&"c"));
    }

    #[test]
    fn test_predicate_filters_notifications() {
        let notifier = Notifier::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        let _sub = notifier.subscribe(
            |changes| changes.affects(&1),
            move |changes| seen_clone.lock().push(changes.clone()),
        );

        notifier.notify(ChangeSet::items([2]));
        notifier.notify(ChangeSet::items([1, 2]));
        notifier.notify(ChangeSet::All);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], ChangeSet::All);
    }

    #[test]
    fn test_empty_change_set_not_delivered() {
        let notifier = Notifier::<u32>::new();
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        let _sub = notifier.subscribe_all(move |_| *count_clone.lock() += 1);

        notifier.notify(ChangeSet::items(Vec::<u32>::new()));
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_subscription_released_on_drop() {
        let notifier = Notifier::<u32>::new();
        let sub = notifier.subscribe_all(|_| {});
        assert_eq!(notifier.subscriber_count(), 1);
        drop(sub);
        assert_eq!(notifier.subscriber_count(), 0);

        let sub = notifier.subscribe_all(|_| {});
        sub.unsubscribe();
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
