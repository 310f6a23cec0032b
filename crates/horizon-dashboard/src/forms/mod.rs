//! Form controls for dashboard settings pages.
//!
//! The centerpiece is [`RichListField`], an editable list-of-items control:
//!
//! - [`item_list`]: pure add/update/remove transitions
//! - [`ItemCodec`]: the field's serialized value to and from items
//! - [`ItemDelegate`]: who decides when a mutation is committed
//! - [`RenderItem`]: how one item is displayed
//! - [`AddDropdown`]: the searchable menu behind the add button
//! - [`FieldBinding`]: the contract with the form that owns the value

mod add_dropdown;
mod codec;
mod delegate;
mod field;
pub mod item_list;
mod render;
mod rich_list_field;

pub use add_dropdown::{
    AddDropdown, CaseSensitivity, DropdownChoice, DropdownGroup, MenuAlignment, VisibleGroup,
};
pub use codec::{ItemCodec, JsonListCodec};
pub use delegate::{
    AddCommit, DefaultItemDelegate, EditCommit, FnDelegate, ItemDelegate, RemoveCommit,
};
pub use field::{FieldBinding, FormField, ListChangeEvent, ListChangeKind};
pub use item_list::ListIntent;
pub use render::{AddButton, IdentityRender, ItemAction, ItemRow, RenderFn, RenderItem, RichListView};
pub use rich_list_field::{RichListField, RichListFieldBuilder, ADD_ICON};
