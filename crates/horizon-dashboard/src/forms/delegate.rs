//! Add/edit/remove delegates for the rich list field.
//!
//! When the user asks to add, edit or remove an item, the field does not
//! mutate anything itself. It hands the request to an [`ItemDelegate`]
//! together with a commit continuation. The delegate decides whether and
//! when to commit: immediately, after a confirmation dialog, with a
//! transformed item, or never.
//!
//! A commit re-reads the owner's value at the moment it runs, applies one
//! mutation and reports the new value through [`FieldBinding::on_change`].
//! Two deferred commits therefore apply in the order they complete, each on
//! top of the other; there is no merging. Dropping a continuation without
//! calling it leaves the field untouched.
//!
//! # Example
//!
//! ```ignore
//! use horizon_dashboard::forms::{FnDelegate, RichListField};
//!
//! let delegate = FnDelegate::new()
//!     .on_edit(|item, commit| {
//!         // Open a settings dialog; commit from its "Save" handler.
//!         dialog.open(item.clone(), move |edited| commit.commit(edited));
//!     });
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_dashboard_core::logging::targets;

use super::codec::ItemCodec;
use super::field::{FieldBinding, ListChangeEvent, ListChangeKind};
use super::item_list::ListIntent;
use crate::error::Result;

/// Where a commit lands: the owner's value plus the codec for it.
pub(crate) struct CommitTarget<T> {
    binding: Arc<dyn FieldBinding>,
    codec: Arc<dyn ItemCodec<T>>,
}

impl<T> Clone for CommitTarget<T> {
    fn clone(&self) -> Self {
        Self {
            binding: Arc::clone(&self.binding),
            codec: Arc::clone(&self.codec),
        }
    }
}

impl<T> CommitTarget<T> {
    pub(crate) fn new(binding: Arc<dyn FieldBinding>, codec: Arc<dyn ItemCodec<T>>) -> Self {
        Self { binding, codec }
    }

    #[tracing::instrument(skip_all, target = "horizon_dashboard::forms", level = "debug")]
    fn apply(&self, intent: ListIntent<T>) -> Result<()> {
        let current = self.codec.decode(&self.binding.value())?;
        let event = match &intent {
            ListIntent::Append(_) => ListChangeEvent::new(ListChangeKind::Add, current.len()),
            ListIntent::Replace { index, .. } => {
                ListChangeEvent::new(ListChangeKind::Update, *index)
            }
            ListIntent::Remove { index } => ListChangeEvent::new(ListChangeKind::Remove, *index),
        };

        let next = intent.try_apply_owned(current)?;
        let encoded = self.codec.encode(&next)?;
        tracing::debug!(
            target: targets::FORMS,
            kind = %event.kind,
            index = event.index,
            len = next.len(),
            "committing list change"
        );
        self.binding.on_change(encoded, event);
        Ok(())
    }
}

/// Continuation that appends an item when committed.
pub struct AddCommit<T> {
    target: CommitTarget<T>,
}

impl<T> AddCommit<T> {
    pub(crate) fn new(target: CommitTarget<T>) -> Self {
        Self { target }
    }

    /// Append `item` to the owner's current list.
    pub fn commit(self, item: T) -> Result<()> {
        self.target.apply(ListIntent::Append(item))
    }
}

/// Continuation that replaces the item at one position when committed.
pub struct EditCommit<T> {
    target: CommitTarget<T>,
    index: usize,
}

impl<T> EditCommit<T> {
    pub(crate) fn new(target: CommitTarget<T>, index: usize) -> Self {
        Self { target, index }
    }

    /// The position being edited.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Replace the item at [`index`](Self::index) with `item`.
    pub fn commit(self, item: T) -> Result<()> {
        self.target.apply(ListIntent::Replace {
            index: self.index,
            item,
        })
    }
}

/// Continuation that removes the item at one position when committed.
pub struct RemoveCommit<T> {
    target: CommitTarget<T>,
    index: usize,
}

impl<T> RemoveCommit<T> {
    pub(crate) fn new(target: CommitTarget<T>, index: usize) -> Self {
        Self { target, index }
    }

    /// The position being removed.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Remove the item at [`index`](Self::index).
    pub fn commit(self) -> Result<()> {
        self.target.apply(ListIntent::Remove { index: self.index })
    }
}

macro_rules! impl_commit_debug {
    ($($name:ident),*) => {
        $(
            impl<T> fmt::Debug for $name<T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($name)).finish_non_exhaustive()
                }
            }
        )*
    };
}

impl_commit_debug!(AddCommit, EditCommit, RemoveCommit);

fn report(result: Result<()>, kind: ListChangeKind) {
    if let Err(err) = result {
        tracing::warn!(target: targets::FORMS, %kind, error = %err, "list commit failed");
    }
}

/// Decides whether and when a requested list mutation is committed.
///
/// The provided methods are the defaults: additions and removals commit
/// immediately, edits do nothing until a delegate implements them.
pub trait ItemDelegate<T>: Send + Sync {
    /// The user picked `item` from the add menu.
    fn add_item(&self, item: T, commit: AddCommit<T>) {
        report(commit.commit(item), ListChangeKind::Add);
    }

    /// The user clicked the edit affordance of `item`.
    fn edit_item(&self, item: &T, commit: EditCommit<T>) {
        let _ = (item, commit);
    }

    /// The user clicked the remove affordance of `item`.
    fn remove_item(&self, item: &T, commit: RemoveCommit<T>) {
        let _ = item;
        report(commit.commit(), ListChangeKind::Remove);
    }
}

/// The delegate used when the caller does not supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultItemDelegate;

impl<T> ItemDelegate<T> for DefaultItemDelegate {}

type AddHook<T> = Box<dyn Fn(T, AddCommit<T>) + Send + Sync>;
type EditHook<T> = Box<dyn Fn(&T, EditCommit<T>) + Send + Sync>;
type RemoveHook<T> = Box<dyn Fn(&T, RemoveCommit<T>) + Send + Sync>;

/// A delegate assembled from closures.
///
/// Hooks that are not set keep the default behavior.
pub struct FnDelegate<T> {
    on_add: Option<AddHook<T>>,
    on_edit: Option<EditHook<T>>,
    on_remove: Option<RemoveHook<T>>,
}

impl<T> Default for FnDelegate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FnDelegate<T> {
    /// Create a delegate with every hook at its default.
    pub fn new() -> Self {
        Self {
            on_add: None,
            on_edit: None,
            on_remove: None,
        }
    }

    /// Set the add hook.
    pub fn on_add<F>(mut self, hook: F) -> Self
    where
        F: Fn(T, AddCommit<T>) + Send + Sync + 'static,
    {
        self.on_add = Some(Box::new(hook));
        self
    }

    /// Set the edit hook.
    pub fn on_edit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T, EditCommit<T>) + Send + Sync + 'static,
    {
        self.on_edit = Some(Box::new(hook));
        self
    }

    /// Set the remove hook.
    pub fn on_remove<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T, RemoveCommit<T>) + Send + Sync + 'static,
    {
        self.on_remove = Some(Box::new(hook));
        self
    }
}

impl<T> ItemDelegate<T> for FnDelegate<T> {
    fn add_item(&self, item: T, commit: AddCommit<T>) {
        match &self.on_add {
            Some(hook) => hook(item, commit),
            None => DefaultItemDelegate.add_item(item, commit),
        }
    }

    fn edit_item(&self, item: &T, commit: EditCommit<T>) {
        if let Some(hook) = &self.on_edit {
            hook(item, commit);
        }
    }

    fn remove_item(&self, item: &T, commit: RemoveCommit<T>) {
        match &self.on_remove {
            Some(hook) => hook(item, commit),
            None => DefaultItemDelegate.remove_item(item, commit),
        }
    }
}

impl<T> fmt::Debug for FnDelegate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDelegate")
            .field("on_add", &self.on_add.is_some())
            .field("on_edit", &self.on_edit.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::forms::codec::JsonListCodec;
    use crate::forms::field::FormField;
    use parking_lot::Mutex;

    fn target(initial: &str) -> (Arc<FormField>, CommitTarget<i64>) {
        let field = Arc::new(FormField::new("numbers", initial));
        let binding: Arc<dyn FieldBinding> = field.clone();
        let target = CommitTarget::new(binding, Arc::new(JsonListCodec::<i64>::new()));
        (field, target)
    }

    fn record(field: &FormField) -> Arc<Mutex<Vec<(String, ListChangeEvent)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        field.value_changed.connect(move |change| seen_clone.lock().push(change.clone()));
        seen
    }

    #[test]
    fn test_default_delegate_commits_add_and_remove() {
        let (field, target) = target("[1,2]");
        let seen = record(&field);

        DefaultItemDelegate.add_item(3, AddCommit::new(target.clone()));
        assert_eq!(field.value(), "[1,2,3]");

        DefaultItemDelegate.remove_item(&1, RemoveCommit::new(target, 0));
        assert_eq!(field.value(), "[2,3]");

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1, ListChangeEvent::new(ListChangeKind::Add, 2));
        assert_eq!(seen[1].1, ListChangeEvent::new(ListChangeKind::Remove, 0));
    }

    #[test]
    fn test_default_delegate_edit_is_noop() {
        let (field, target) = target("[1,2]");
        let seen = record(&field);

        DefaultItemDelegate.edit_item(&1, EditCommit::new(target, 0));

        assert_eq!(field.value(), "[1,2]");
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_deferred_commit_uses_current_value() {
        let (field, target) = target("[1,2,3]");
        let parked: Arc<Mutex<Option<EditCommit<i64>>>> = Arc::new(Mutex::new(None));

        let parked_clone = parked.clone();
        let delegate = FnDelegate::new().on_edit(move |_item: &i64, commit| {
            *parked_clone.lock() = Some(commit);
        });

        delegate.edit_item(&1, EditCommit::new(target.clone(), 0));
        assert_eq!(field.value(), "[1,2,3]");

        // Another removal lands while the edit is still pending.
        delegate.remove_item(&3, RemoveCommit::new(target, 2));
        assert_eq!(field.value(), "[1,2]");

        let commit = parked.lock().take().unwrap();
        commit.commit(10).unwrap();
        assert_eq!(field.value(), "[10,2]");
    }

    #[test]
    fn test_stale_index_commit_changes_nothing() {
        let (field, target) = target("[1,2]");
        let seen = record(&field);

        let stale = RemoveCommit::new(target.clone(), 1);
        RemoveCommit::new(target, 1).commit().unwrap();

        let err = stale.commit().unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(field.value(), "[1]");
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_malformed_value_propagates() {
        let (field, target) = target("not json");
        let seen = record(&field);

        let err = AddCommit::new(target).commit(1).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_fn_delegate_can_transform_and_reject() {
        let (field, target) = target("[]");
        let delegate = FnDelegate::new().on_add(|item: i64, commit| {
            if item >= 0 {
                commit.commit(item * 10).unwrap();
            }
        });

        delegate.add_item(4, AddCommit::new(target.clone()));
        delegate.add_item(-1, AddCommit::new(target));
        assert_eq!(field.value(), "[40]");
    }
}
