//! Pure list transitions behind the rich list field.
//!
//! Every function here takes the current list by reference and returns a
//! freshly allocated list; the input is never touched, so callers may keep
//! their copy of the previous render around.
//!
//! Items are identified by position only. Two equal items at different
//! indices are different rows.

use crate::error::{Error, Result};

/// Returns a new list with `item` appended.
pub fn add<T: Clone>(current: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(item);
    next
}

/// Returns a new list with the element at `index` replaced by `item`.
///
/// # Panics
///
/// Panics if `index >= current.len()`. Indices always come from the list
/// that was just rendered, so an out-of-range index is a bug in the caller.
pub fn update<T: Clone>(current: &[T], index: usize, item: T) -> Vec<T> {
    assert!(
        index < current.len(),
        "update index {index} out of range for list of length {}",
        current.len()
    );
    let mut next = current.to_vec();
    next[index] = item;
    next
}

/// Returns a new list without the element at `index`; later elements shift
/// down by one.
///
/// # Panics
///
/// Panics if `index >= current.len()`.
pub fn remove<T: Clone>(current: &[T], index: usize) -> Vec<T> {
    assert!(
        index < current.len(),
        "remove index {index} out of range for list of length {}",
        current.len()
    );
    let mut next = current.to_vec();
    next.remove(index);
    next
}

/// One requested list mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ListIntent<T> {
    /// Append an item at the end.
    Append(T),
    /// Replace the item at a position.
    Replace { index: usize, item: T },
    /// Remove the item at a position.
    Remove { index: usize },
}

impl<T> ListIntent<T> {
    /// The position this intent targets, or `None` for appends.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Append(_) => None,
            Self::Replace { index, .. } | Self::Remove { index } => Some(*index),
        }
    }

    /// Apply the intent to a list the caller already owns, reporting an
    /// out-of-range index as an error.
    ///
    /// Commits that were deferred by a delegate land on whatever list the
    /// owner holds at that moment, which may be shorter than the one the
    /// index was taken from.
    pub fn try_apply_owned(self, mut list: Vec<T>) -> Result<Vec<T>> {
        if let Some(index) = self.index() {
            if index >= list.len() {
                return Err(Error::index_out_of_range(index, list.len()));
            }
        }
        match self {
            Self::Append(item) => list.push(item),
            Self::Replace { index, item } => list[index] = item,
            Self::Remove { index } => {
                list.remove(index);
            }
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends() {
        assert_eq!(add(&["a", "b"], "c"), vec!["a", "b", "c"]);
        assert_eq!(add(&[], 1), vec![1]);
    }

    #[test]
    fn test_update_replaces_only_target() {
        assert_eq!(update(&["a", "b", "c"], 1, "x"), vec!["a", "x", "c"]);
    }

    #[test]
    fn test_remove_shifts_subsequent() {
        assert_eq!(remove(&["a", "b", "c"], 1), vec!["a", "c"]);
        assert_eq!(remove(&["a"], 0), Vec::<&str>::new());
    }

    #[test]
    fn test_duplicates_are_positional() {
        assert_eq!(remove(&["a", "a", "b"], 1), vec!["a", "b"]);
        assert_eq!(update(&["a", "a"], 0, "z"), vec!["z", "a"]);
    }

    #[test]
    fn test_results_do_not_alias_input() {
        let original = vec![String::from("a"), String::from("b")];

        let mut added = add(&original, String::from("c"));
        added[0].push('!');
        let mut updated = update(&original, 1, String::from("x"));
        updated[0].push('!');
        let mut removed = remove(&original, 1);
        removed[0].push('!');

        assert_eq!(original, vec!["a", "b"]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_update_out_of_range_panics() {
        update(&[1, 2], 2, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_remove_out_of_range_panics() {
        remove::<u8>(&[], 0);
    }

    #[test]
    fn test_try_apply_reports_stale_index() {
        let err = ListIntent::Remove { index: 2 }
            .try_apply_owned(vec![1, 2])
            .unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 2, len: 2 }));

        let next = ListIntent::Replace { index: 0, item: 9 }
            .try_apply_owned(vec![1, 2])
            .unwrap();
        assert_eq!(next, vec![9, 2]);
        assert_eq!(
            ListIntent::Append(3).try_apply_owned(vec![1, 2]).unwrap(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_try_apply_owned_matches_pure_ops() {
        let list = vec!["a", "b", "c"];
        let owned = ListIntent::Remove { index: 1 }.try_apply_owned(list.clone()).unwrap();
        assert_eq!(owned, remove(&list, 1));

        let owned = ListIntent::Replace { index: 2, item: "x" }
            .try_apply_owned(list.clone())
            .unwrap();
        assert_eq!(owned, update(&list, 2, "x"));
    }
}
