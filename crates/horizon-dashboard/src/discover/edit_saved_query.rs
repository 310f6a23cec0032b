//! Sidebar panel for editing a saved Discover query.
//!
//! The panel edits the saved query's name locally; the query itself lives in
//! the [`QueryBuilder`]. Save is only offered when either differs from what
//! was saved.

use horizon_dashboard_core::logging::targets;
use horizon_dashboard_core::{Property, Signal};

use super::saved_query::{parse_saved_query, QueryBuilder, SavedQuery};

/// A button in the panel's action row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub label: &'static str,
    /// Shows a spinner and ignores clicks.
    pub busy: bool,
    pub disabled: bool,
}

/// The icon-only delete affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAction {
    pub icon: &'static str,
    pub test_id: &'static str,
}

/// The panel's action row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryActions {
    pub run: ActionButton,
    pub save: ActionButton,
    pub delete: DeleteAction,
}

/// Editor for one saved query.
pub struct EditSavedQuery<B> {
    builder: B,
    saved: SavedQuery,
    name: Property<String>,
    is_fetching: Property<bool>,
    is_loading: Property<bool>,
    /// Emitted when Run is clicked.
    pub run_requested: Signal<()>,
    /// Emitted with the edited name when Save is clicked.
    pub save_requested: Signal<String>,
    /// Emitted when the delete affordance is clicked.
    pub delete_requested: Signal<()>,
}

impl<B: QueryBuilder> EditSavedQuery<B> {
    /// Start editing `saved`, whose query is loaded into `builder`.
    pub fn new(builder: B, saved: SavedQuery) -> Self {
        Self {
            builder,
            name: Property::new(saved.name.clone()),
            saved,
            is_fetching: Property::new(false),
            is_loading: Property::new(false),
            run_requested: Signal::new(),
            save_requested: Signal::new(),
            delete_requested: Signal::new(),
        }
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn saved_query(&self) -> &SavedQuery {
        &self.saved
    }

    /// The name as currently edited.
    pub fn name(&self) -> String {
        self.name.get()
    }

    /// Update the edited name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.name.set(name.into());
    }

    /// Whether a query result is being fetched.
    pub fn set_fetching(&self, fetching: bool) {
        self.is_fetching.set(fetching);
    }

    /// Whether the query fields are still loading their options.
    pub fn set_loading(&self, loading: bool) {
        self.is_loading.set(loading);
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    /// Whether the query or the name differs from the saved query.
    pub fn has_changes(&self) -> bool {
        parse_saved_query(&self.saved) != self.builder.internal()
            || self.name.with(|name| *name != self.saved.name)
    }

    /// The action row for the current state.
    pub fn actions(&self) -> QueryActions {
        QueryActions {
            run: ActionButton {
                label: "Run",
                busy: self.is_fetching.get(),
                disabled: false,
            },
            save: ActionButton {
                label: "Save",
                busy: false,
                disabled: !self.has_changes(),
            },
            delete: DeleteAction {
                icon: "icon-trash",
                test_id: "delete",
            },
        }
    }

    /// Handle a click on Run. Ignored while a fetch is in flight.
    pub fn run(&self) {
        if self.is_fetching.get() {
            return;
        }
        self.run_requested.emit(());
    }

    /// Handle a click on Save. Ignored when nothing changed.
    pub fn save(&self) -> bool {
        if !self.has_changes() {
            tracing::debug!(target: targets::DISCOVER, id = %self.saved.id, "save ignored, no changes");
            return false;
        }
        self.save_requested.emit(self.name.get());
        true
    }

    /// Handle a click on the delete affordance.
    pub fn delete(&self) {
        self.delete_requested.emit(());
    }
}

impl<B> std::fmt::Debug for EditSavedQuery<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSavedQuery")
            .field("id", &self.saved.id)
            .field("name", &self.name.get())
            .finish_non_exhaustive()
    }
}
