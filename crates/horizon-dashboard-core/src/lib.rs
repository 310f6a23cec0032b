//! Core systems for Horizon Dashboard.
//!
//! This crate provides the reactive plumbing shared by the dashboard views:
//!
//! - **Signal/Slot System**: Type-safe notification between components
//! - **Property System**: Component state with change detection
//! - **Store Notifications**: Predicate-filtered subscriptions with RAII release
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Example
//!
//! ```
//! use horizon_dashboard_core::{Property, Signal};
//!
//! let value = Property::new(String::from("[]"));
//! let value_changed = Signal::<String>::new();
//!
//! value_changed.connect(|value| println!("now {}", value));
//!
//! if value.set(String::from("[1]")) {
//!     value_changed.emit(value.get());
//! }
//! ```

pub mod logging;
pub mod property;
pub mod signal;
pub mod store;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use store::{ChangeSet, Notifier, Subscription};
