//! The per-row selection checkbox of the issue stream.

use std::sync::{Arc, Weak};

use horizon_dashboard_core::logging::targets;
use horizon_dashboard_core::{Property, Signal, Subscription};

use super::selected_group_store::SelectedGroupStore;

/// What the host toolkit draws for one checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckBoxView {
    /// The group id, submitted as the checkbox value.
    pub value: String,
    pub checked: bool,
}

struct State {
    id: Property<String>,
    checked: Property<bool>,
    toggled: Signal<bool>,
}

impl State {
    fn refresh(&self, store: &SelectedGroupStore) {
        let checked = store.is_selected(&self.id.get());
        if self.checked.set(checked) {
            tracing::trace!(target: targets::STREAM, id = %self.id.get(), checked, "group checkbox flipped");
            self.toggled.emit(checked);
        }
    }
}

/// Checkbox mirroring one group's entry in a [`SelectedGroupStore`].
///
/// The checkbox listens only to store changes that mention its own id, and
/// [`toggled`](Self::toggled) fires only when its checked state actually
/// flips. Dropping the checkbox releases its store subscription.
pub struct GroupCheckBox {
    state: Arc<State>,
    store: Arc<SelectedGroupStore>,
    _subscription: Subscription,
}

impl GroupCheckBox {
    /// Create a checkbox for group `id`.
    pub fn new(id: impl Into<String>, store: Arc<SelectedGroupStore>) -> Self {
        let id = id.into();
        let state = Arc::new(State {
            checked: Property::new(store.is_selected(&id)),
            id: Property::new(id),
            toggled: Signal::new(),
        });

        let predicate_state = Arc::downgrade(&state);
        let callback_state = Arc::downgrade(&state);
        let callback_store: Weak<SelectedGroupStore> = Arc::downgrade(&store);
        let subscription = store.subscribe(
            move |changes| {
                predicate_state
                    .upgrade()
                    .is_some_and(|state| changes.affects(&state.id.get()))
            },
            move |_| {
                if let (Some(state), Some(store)) = (callback_state.upgrade(), callback_store.upgrade()) {
                    state.refresh(&store);
                }
            },
        );

        Self {
            state,
            store,
            _subscription: subscription,
        }
    }

    /// The group id.
    pub fn id(&self) -> String {
        self.state.id.get()
    }

    /// Point the checkbox at another group and re-read its state.
    pub fn set_id(&self, id: impl Into<String>) {
        if self.state.id.set(id.into()) {
            self.state.refresh(&self.store);
        }
    }

    pub fn is_checked(&self) -> bool {
        self.state.checked.get()
    }

    /// Emitted with the new checked state whenever it flips.
    pub fn toggled(&self) -> &Signal<bool> {
        &self.state.toggled
    }

    /// Handle a click: toggle this group in the store.
    pub fn on_select(&self) {
        self.store.toggle_select(&self.state.id.get());
    }

    pub fn render(&self) -> CheckBoxView {
        CheckBoxView {
            value: self.state.id.get(),
            checked: self.state.checked.get(),
        }
    }
}

impl std::fmt::Debug for GroupCheckBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupCheckBox")
            .field("id", &self.state.id.get())
            .field("checked", &self.state.checked.get())
            .finish()
    }
}
