//! Discover saved-query editing.

mod edit_saved_query;
mod saved_query;

pub use edit_saved_query::{ActionButton, DeleteAction, EditSavedQuery, QueryActions};
pub use saved_query::{parse_saved_query, Query, QueryBuilder, SavedQuery};
