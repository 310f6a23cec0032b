//! Signal/slot system for Horizon Dashboard.
//!
//! Components announce state changes through signals; owners and sibling
//! components connect slots (closures) to react. Every dashboard view runs on
//! the UI thread, so slots are always invoked directly in the emitting
//! thread.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type used for change notifications
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use horizon_dashboard_core::Signal;
//!
//! let value_changed = Signal::<String>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit("[]".to_string());
//! value_changed.disconnect(conn_id);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type ConnectionMap<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, usize)` for several.
///
/// Slots are collected before invocation and run without the connection lock
/// held, so a slot may connect or disconnect other slots on the same signal.
pub struct Signal<Args> {
    connections: Arc<ConnectionMap<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    ///
    /// The guard only holds a weak reference to the connection table, so it
    /// may safely outlive the signal.
    ///
    /// ```
    /// use horizon_dashboard_core::Signal;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let signal = Signal::<i32>::new();
    /// let counter = Arc::new(AtomicI32::new(0));
    /// {
    ///     let counter_clone = counter.clone();
    ///     let _guard = signal.connect_scoped(move |&n| {
    ///         counter_clone.fetch_add(n, Ordering::SeqCst);
    ///     });
    ///     signal.emit(42);
    /// }
    /// signal.emit(43);
    /// assert_eq!(counter.load(Ordering::SeqCst), 42);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        let connections: Weak<ConnectionMap<Args>> = Arc::downgrade(&self.connections);
        ConnectionGuard {
            disconnect: Some(Box::new(move || {
                if let Some(connections) = connections.upgrade() {
                    connections.lock().remove(id);
                }
            })),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking all connected slots.
    #[tracing::instrument(skip_all, target = "horizon_dashboard_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`] and by the store subscription
/// interface in [`crate::store`].
pub struct ConnectionGuard {
    disconnect: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ConnectionGuard {
    /// Disconnect immediately instead of waiting for drop.
    pub fn disconnect(mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}
