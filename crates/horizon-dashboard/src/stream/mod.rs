//! Issue stream selection.
//!
//! A [`SelectedGroupStore`] tracks which groups of the stream are selected
//! for bulk actions; each row renders a [`GroupCheckBox`] bound to it.

mod group_checkbox;
mod selected_group_store;

pub use group_checkbox::{CheckBoxView, GroupCheckBox};
pub use selected_group_store::SelectedGroupStore;
