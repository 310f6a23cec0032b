//! Prelude module for Horizon Dashboard.
//!
//! ```ignore
//! use horizon_dashboard::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::property::Property;
pub use crate::signal::{ConnectionGuard, ConnectionId, Signal};
pub use crate::store::{ChangeSet, Subscription};

// ============================================================================
// Forms
// ============================================================================

pub use crate::forms::{
    AddDropdown, DropdownChoice, DropdownGroup, FieldBinding, FnDelegate, FormField,
    ItemDelegate, ListChangeEvent, ListChangeKind, RenderFn, RichListField,
};

// ============================================================================
// Stream and Discover
// ============================================================================

pub use crate::discover::{EditSavedQuery, SavedQuery};
pub use crate::stream::{GroupCheckBox, SelectedGroupStore};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::DashboardConfig;
pub use crate::error::Error;
