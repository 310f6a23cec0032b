//! Reactive properties with change detection.
//!
//! A [`Property<T>`] holds one piece of component state. `set()` reports
//! whether the value actually changed, so the owner only emits its
//! notification signal (and only re-renders) on real transitions.
//!
//! # Example
//!
//! ```
//! use horizon_dashboard_core::{Property, Signal};
//!
//! struct Checkbox {
//!     checked: Property<bool>,
//!     toggled: Signal<bool>,
//! }
//!
//! impl Checkbox {
//!     fn set_checked(&self, checked: bool) {
//!         if self.checked.set(checked) {
//!             self.toggled.emit(checked);
//!         }
//!     }
//! }
//!
//! let checkbox = Checkbox { checked: Property::new(false), toggled: Signal::new() };
//! checkbox.set_checked(true);
//! assert!(checkbox.checked.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// Uses interior mutability through a `RwLock`, so components can update
/// state from `&self` inside signal slots.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
