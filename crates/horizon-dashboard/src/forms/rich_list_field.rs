//! An editable list-of-items form control.
//!
//! [`RichListField`] shows the items of a list-valued form field as inline
//! chips, each with edit and remove affordances, followed by an add button
//! that opens an [`AddDropdown`]. The field keeps no list of its own: it
//! decodes the owner's value on every render and every interaction, and all
//! mutations go through an [`ItemDelegate`] which commits them back to the
//! owner.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_dashboard::forms::{
//!     AddDropdown, DropdownChoice, FieldBinding, FormField, RenderFn, RichListField,
//! };
//! use serde_json::{json, Value};
//!
//! let owner = Arc::new(FormField::new("symbolSources", "[]"));
//! let menu = AddDropdown::flat(vec![DropdownChoice::new(
//!     "Amazon S3",
//!     json!({"value": "s3", "label": "Amazon S3"}),
//! )]);
//!
//! let field = RichListField::builder(owner.clone(), menu)
//!     .render_item(RenderFn::new(|item: &Value| item["label"].to_string()))
//!     .build();
//!
//! field.dropdown().select(0, 0);
//! assert_eq!(owner.value(), r#"[{"value":"s3","label":"Amazon S3"}]"#);
//! assert_eq!(field.render().unwrap().rows.len(), 1);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;

use horizon_dashboard_core::logging::targets;
use horizon_dashboard_core::{ConnectionGuard, PerfSpan};

use super::add_dropdown::AddDropdown;
use super::codec::{ItemCodec, JsonListCodec};
use super::delegate::{
    AddCommit, CommitTarget, DefaultItemDelegate, EditCommit, ItemDelegate, RemoveCommit,
};
use super::field::FieldBinding;
use super::render::{AddButton, IdentityRender, ItemRow, RenderItem, RichListView};
use crate::config::RichListConfig;
use crate::error::{Error, Result};

/// Icon shown on the add button.
pub const ADD_ICON: &str = "icon-circle-add";

struct Inner<T, R> {
    binding: Arc<dyn FieldBinding>,
    codec: Arc<dyn ItemCodec<T>>,
    delegate: Arc<dyn ItemDelegate<T>>,
    renderer: R,
    add_button_text: String,
    dropdown: AddDropdown<T>,
}

impl<T, R> Inner<T, R>
where
    T: Clone + Send + Sync + 'static,
{
    fn target(&self) -> CommitTarget<T> {
        CommitTarget::new(Arc::clone(&self.binding), Arc::clone(&self.codec))
    }

    fn request_add(&self, item: T) -> Result<()> {
        self.codec.decode(&self.binding.value())?;
        tracing::debug!(target: targets::FORMS, "add requested");
        self.delegate.add_item(item, AddCommit::new(self.target()));
        Ok(())
    }

    fn item_at(&self, index: usize) -> Result<T> {
        let mut items = self.codec.decode(&self.binding.value())?;
        if index >= items.len() {
            return Err(Error::index_out_of_range(index, items.len()));
        }
        Ok(items.swap_remove(index))
    }
}

/// Editable list-of-items form control.
///
/// Dropping the field disconnects it from its add menu.
pub struct RichListField<T, R = IdentityRender> {
    inner: Arc<Inner<T, R>>,
    _add_connection: ConnectionGuard,
}

impl<T> RichListField<T, IdentityRender>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Start building a field bound to `binding`, adding items from `dropdown`.
    ///
    /// The field defaults to the JSON list codec, the default delegate and
    /// identity rendering.
    pub fn builder(
        binding: Arc<dyn FieldBinding>,
        dropdown: AddDropdown<T>,
    ) -> RichListFieldBuilder<T, IdentityRender> {
        RichListFieldBuilder {
            binding,
            codec: Arc::new(JsonListCodec::new()),
            delegate: Arc::new(DefaultItemDelegate),
            renderer: IdentityRender,
            add_button_text: RichListConfig::default().add_button_text,
            dropdown,
        }
    }
}

impl<T, R> RichListField<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: RenderItem<T> + 'static,
{
    /// The owner's current serialized value.
    pub fn value(&self) -> String {
        self.inner.binding.value()
    }

    /// Decode the owner's current value.
    pub fn items(&self) -> Result<Vec<T>> {
        self.inner.codec.decode(&self.inner.binding.value())
    }

    /// Whether the owner's value holds any items.
    pub fn has_items(&self) -> Result<bool> {
        self.inner.codec.has_items(&self.inner.binding.value())
    }

    /// The add menu.
    pub fn dropdown(&self) -> &AddDropdown<T> {
        &self.inner.dropdown
    }

    /// Caption of the add button.
    pub fn add_button_text(&self) -> &str {
        &self.inner.add_button_text
    }

    /// Build the display tree for the owner's current value.
    ///
    /// Fails if the value cannot be decoded.
    pub fn render(&self) -> Result<RichListView<R::Output>> {
        let _span = PerfSpan::new("rich_list_field::render");
        let value = self.inner.binding.value();

        let rows = self
            .inner
            .codec
            .decode(&value)?
            .iter()
            .enumerate()
            .map(|(index, item)| ItemRow::new(index, self.inner.renderer.render_item(item)))
            .collect();

        Ok(RichListView {
            rows,
            add_button: AddButton {
                text: self.inner.add_button_text.clone(),
                icon: ADD_ICON,
                is_open: self.inner.dropdown.is_open(),
            },
        })
    }

    /// Propose `item` for addition, as picking it from the add menu does.
    ///
    /// Fails if the owner's value cannot be decoded; the delegate is not
    /// consulted in that case.
    pub fn request_add(&self, item: T) -> Result<()> {
        self.inner.request_add(item)
    }

    /// Handle a click on the edit affordance of the row at `index`.
    ///
    /// Fails if the value cannot be decoded or has no item at `index`.
    pub fn request_edit(&self, index: usize) -> Result<()> {
        let item = self.inner.item_at(index)?;
        tracing::debug!(target: targets::FORMS, index, "edit requested");
        self.inner
            .delegate
            .edit_item(&item, EditCommit::new(self.inner.target(), index));
        Ok(())
    }

    /// Handle a click on the remove affordance of the row at `index`.
    ///
    /// Fails if the value cannot be decoded or has no item at `index`.
    pub fn request_remove(&self, index: usize) -> Result<()> {
        let item = self.inner.item_at(index)?;
        tracing::debug!(target: targets::FORMS, index, "remove requested");
        self.inner
            .delegate
            .remove_item(&item, RemoveCommit::new(self.inner.target(), index));
        Ok(())
    }
}

impl<T, R> fmt::Debug for RichListField<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichListField")
            .field("value", &self.inner.binding.value())
            .field("add_button_text", &self.inner.add_button_text)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RichListField`].
pub struct RichListFieldBuilder<T, R> {
    binding: Arc<dyn FieldBinding>,
    codec: Arc<dyn ItemCodec<T>>,
    delegate: Arc<dyn ItemDelegate<T>>,
    renderer: R,
    add_button_text: String,
    dropdown: AddDropdown<T>,
}

impl<T, R> RichListFieldBuilder<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: RenderItem<T> + 'static,
{
    /// Use a different serialization for the owner's value.
    pub fn codec(mut self, codec: impl ItemCodec<T> + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Use a custom add/edit/remove delegate.
    pub fn delegate(mut self, delegate: impl ItemDelegate<T> + 'static) -> Self {
        self.delegate = Arc::new(delegate);
        self
    }

    /// Use a custom item renderer.
    pub fn render_item<R2: RenderItem<T> + 'static>(
        self,
        renderer: R2,
    ) -> RichListFieldBuilder<T, R2> {
        RichListFieldBuilder {
            binding: self.binding,
            codec: self.codec,
            delegate: self.delegate,
            renderer,
            add_button_text: self.add_button_text,
            dropdown: self.dropdown,
        }
    }

    /// Set the add button caption.
    pub fn add_button_text(mut self, text: impl Into<String>) -> Self {
        self.add_button_text = text.into();
        self
    }

    /// Apply configured defaults (button caption, menu behavior).
    pub fn config(mut self, config: &RichListConfig) -> Self {
        self.add_button_text = config.add_button_text.clone();
        self.dropdown = self
            .dropdown
            .with_alignment(config.menu_alignment)
            .with_case_sensitivity(config.search_case_sensitivity);
        self
    }

    /// Finish building and wire the add menu to the field.
    pub fn build(self) -> RichListField<T, R> {
        let inner = Arc::new(Inner {
            binding: self.binding,
            codec: self.codec,
            delegate: self.delegate,
            renderer: self.renderer,
            add_button_text: self.add_button_text,
            dropdown: self.dropdown,
        });

        let weak: Weak<Inner<T, R>> = Arc::downgrade(&inner);
        let add_connection = inner.dropdown.selected.connect_scoped(move |item: &T| {
            if let Some(inner) = weak.upgrade() {
                if let Err(err) = inner.request_add(item.clone()) {
                    tracing::warn!(target: targets::FORMS, error = %err, "add from menu failed");
                }
            }
        });

        RichListField {
            inner,
            _add_connection: add_connection,
        }
    }
}
