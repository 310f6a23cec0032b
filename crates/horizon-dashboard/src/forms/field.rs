//! The contract between a field control and the form that owns its value.
//!
//! A form owns the serialized value of each of its fields. Controls read the
//! value through [`FieldBinding::value`] on every render and hand back a
//! complete replacement through [`FieldBinding::on_change`]; they never keep
//! a copy of their own.

use std::fmt;

use horizon_dashboard_core::{Property, Signal};

/// What kind of list mutation produced a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListChangeKind {
    /// An item was appended.
    Add,
    /// An item was replaced in place.
    Update,
    /// An item was removed.
    Remove,
}

impl fmt::Display for ListChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Update => write!(f, "update"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// The event passed alongside every committed list value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListChangeEvent {
    /// The mutation that was applied.
    pub kind: ListChangeKind,
    /// Position of the affected item in the list the mutation was applied to.
    /// For additions this is the index of the new item.
    pub index: usize,
}

impl ListChangeEvent {
    /// Create a change event.
    pub fn new(kind: ListChangeKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// The owner side of a field: the holder of the canonical serialized value.
pub trait FieldBinding: Send + Sync {
    /// The current serialized value.
    fn value(&self) -> String;

    /// Replace the value after a committed mutation.
    ///
    /// Called exactly once per commit, with the fully re-serialized list.
    fn on_change(&self, next: String, event: ListChangeEvent);
}

/// A standalone form field that owns its value.
///
/// `FormField` is the owner used when a rich list control is mounted outside
/// a larger form model. Connect to [`FormField::value_changed`] to persist
/// or validate the new value.
pub struct FormField {
    name: String,
    label: Option<String>,
    help: Option<String>,
    value: Property<String>,
    /// Emitted with the new value and the mutation that produced it.
    pub value_changed: Signal<(String, ListChangeEvent)>,
}

impl FormField {
    /// Create a field with an initial serialized value.
    pub fn new(name: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            help: None,
            value: Property::new(initial.into()),
            value_changed: Signal::new(),
        }
    }

    /// Set the label shown next to the control.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the help text shown under the control.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The field name used when the form is submitted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Replace the value from outside (e.g. after loading saved settings).
    ///
    /// No change event is emitted.
    pub fn reset(&self, value: impl Into<String>) {
        self.value.set_silent(value.into());
    }
}

impl FieldBinding for FormField {
    fn value(&self) -> String {
        self.value.get()
    }

    fn on_change(&self, next: String, event: ListChangeEvent) {
        self.value.set_silent(next.clone());
        self.value_changed.emit((next, event));
    }
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("value", &self.value.get())
            .finish()
    }
}
