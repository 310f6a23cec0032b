//! Item rendering and the display tree of a rich list field.
//!
//! A [`RenderItem`] maps one item to whatever the host toolkit displays in
//! the item's label region. The field wraps every label in an [`ItemRow`]
//! with edit and remove affordances and appends an [`AddButton`].

use std::fmt;

/// Maps an item to its label representation.
///
/// Implementations must not depend on anything but the item; the field calls
/// them once per item on every render.
pub trait RenderItem<T>: Send + Sync {
    /// What a rendered label looks like.
    type Output;

    /// Render one item.
    fn render_item(&self, item: &T) -> Self::Output;
}

/// Renders items as themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRender;

impl<T: Clone> RenderItem<T> for IdentityRender {
    type Output = T;

    fn render_item(&self, item: &T) -> T {
        item.clone()
    }
}

/// Adapts a closure into a [`RenderItem`].
///
/// ```
/// use horizon_dashboard::forms::{RenderFn, RenderItem};
/// use serde_json::{json, Value};
///
/// let label = RenderFn::new(|item: &Value| item["label"].as_str().unwrap_or("").to_string());
/// assert_eq!(label.render_item(&json!({"label": "Amazon S3"})), "Amazon S3");
/// ```
pub struct RenderFn<F> {
    render: F,
}

impl<F> RenderFn<F> {
    /// Wrap a render closure.
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<T, O, F> RenderItem<T> for RenderFn<F>
where
    F: Fn(&T) -> O + Send + Sync,
{
    type Output = O;

    fn render_item(&self, item: &T) -> O {
        (self.render)(item)
    }
}

impl<F> fmt::Debug for RenderFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFn").finish_non_exhaustive()
    }
}

/// An interaction affordance attached to each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemAction {
    /// Opens the item for editing.
    Edit,
    /// Removes the item.
    Remove,
}

impl ItemAction {
    /// Icon name used by the dashboard theme.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Edit => "icon-edit",
            Self::Remove => "icon-trash",
        }
    }
}

/// One displayed item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow<D> {
    /// Position in the list this row was rendered from.
    pub index: usize,
    /// The rendered label.
    pub label: D,
    /// Affordances, in display order.
    pub actions: [ItemAction; 2],
}

impl<D> ItemRow<D> {
    pub(crate) fn new(index: usize, label: D) -> Self {
        Self {
            index,
            label,
            actions: [ItemAction::Edit, ItemAction::Remove],
        }
    }
}

/// The trailing add affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddButton {
    /// Button caption.
    pub text: String,
    /// Icon shown before the caption.
    pub icon: &'static str,
    /// Whether the add menu is currently open.
    pub is_open: bool,
}

/// The full display tree produced by one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RichListView<D> {
    /// Item rows; empty when the field has no items.
    pub rows: Vec<ItemRow<D>>,
    /// The add button driving the add menu.
    pub add_button: AddButton,
}

impl<D> RichListView<D> {
    /// Returns `true` if the empty state should be shown.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rendered labels in list order.
    pub fn labels(&self) -> impl Iterator<Item = &D> {
        self.rows.iter().map(|row| &row.label)
    }
}
