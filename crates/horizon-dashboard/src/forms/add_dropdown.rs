//! The searchable, categorized menu behind a rich list field's add button.
//!
//! Choices are grouped under titles (e.g. "Built-in Repositories" and
//! "Custom Repositories"). Typing into the menu filters choices by their
//! search key. Picking a choice emits [`AddDropdown::selected`] and closes
//! the menu; the owning field connects that signal to its add path.

use serde::{Deserialize, Serialize};

use horizon_dashboard_core::logging::targets;
use horizon_dashboard_core::{Property, Signal};

/// Controls how the search query is matched against choice keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseSensitivity {
    /// "S3" does not match "s3".
    CaseSensitive,
    /// "S3" matches "s3".
    #[default]
    CaseInsensitive,
}

/// Which edge of the add button the menu is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAlignment {
    #[default]
    Left,
    Right,
}

/// One selectable entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownChoice<T> {
    /// Text the search query is matched against.
    pub search_key: String,
    /// Text shown in the menu.
    pub label: String,
    /// The item proposed to the delegate when picked.
    pub value: T,
}

impl<T> DropdownChoice<T> {
    /// Create a choice whose label doubles as its search key.
    pub fn new(label: impl Into<String>, value: T) -> Self {
        let label = label.into();
        Self {
            search_key: label.clone(),
            label,
            value,
        }
    }

    /// Override the search key.
    pub fn with_search_key(mut self, key: impl Into<String>) -> Self {
        self.search_key = key.into();
        self
    }

    fn matches(&self, query: &str, case: CaseSensitivity) -> bool {
        match case {
            CaseSensitivity::CaseSensitive => self.search_key.contains(query),
            CaseSensitivity::CaseInsensitive => self
                .search_key
                .to_lowercase()
                .contains(&query.to_lowercase()),
        }
    }
}

/// A titled group of choices.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownGroup<T> {
    /// Group heading.
    pub title: String,
    /// Choices in display order.
    pub choices: Vec<DropdownChoice<T>>,
}

impl<T> DropdownGroup<T> {
    /// Create a group.
    pub fn new(title: impl Into<String>, choices: Vec<DropdownChoice<T>>) -> Self {
        Self {
            title: title.into(),
            choices,
        }
    }
}

/// A group as currently visible: only the choices matching the query.
///
/// `group` and `choice` indices refer back to the unfiltered menu and are
/// what [`AddDropdown::select`] expects.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleGroup<'a, T> {
    pub group: usize,
    pub title: &'a str,
    pub choices: Vec<(usize, &'a DropdownChoice<T>)>,
}

/// Searchable add menu.
pub struct AddDropdown<T> {
    groups: Vec<DropdownGroup<T>>,
    query: Property<String>,
    is_open: Property<bool>,
    case_sensitivity: CaseSensitivity,
    alignment: MenuAlignment,
    /// Emitted with the picked choice's value.
    pub selected: Signal<T>,
    /// Emitted when the menu opens or closes.
    pub open_changed: Signal<bool>,
}

impl<T: Clone + Send + Sync + 'static> AddDropdown<T> {
    /// Create a closed menu over `groups`.
    pub fn new(groups: Vec<DropdownGroup<T>>) -> Self {
        Self {
            groups,
            query: Property::new(String::new()),
            is_open: Property::new(false),
            case_sensitivity: CaseSensitivity::default(),
            alignment: MenuAlignment::default(),
            selected: Signal::new(),
            open_changed: Signal::new(),
        }
    }

    /// Create a menu from ungrouped choices.
    pub fn flat(choices: Vec<DropdownChoice<T>>) -> Self {
        Self::new(vec![DropdownGroup::new("", choices)])
    }

    /// Set how search queries are matched.
    pub fn with_case_sensitivity(mut self, case: CaseSensitivity) -> Self {
        self.case_sensitivity = case;
        self
    }

    /// Set the menu alignment.
    pub fn with_alignment(mut self, alignment: MenuAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// The menu alignment.
    pub fn alignment(&self) -> MenuAlignment {
        self.alignment
    }

    /// All groups, unfiltered.
    pub fn groups(&self) -> &[DropdownGroup<T>] {
        &self.groups
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    /// Open the menu.
    pub fn open(&self) {
        self.set_open(true);
    }

    /// Close the menu and clear the search query.
    pub fn close(&self) {
        self.query.set_silent(String::new());
        self.set_open(false);
    }

    /// Toggle the menu, as a click on the add button does.
    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    fn set_open(&self, open: bool) {
        if self.is_open.set(open) {
            self.open_changed.emit(open);
        }
    }

    /// The current search query.
    pub fn query(&self) -> String {
        self.query.get()
    }

    /// Update the search query.
    pub fn set_query(&self, query: impl Into<String>) {
        self.query.set(query.into());
    }

    /// Groups with at least one choice matching the query.
    pub fn visible_groups(&self) -> Vec<VisibleGroup<'_, T>> {
        let query = self.query.get();
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(group, g)| {
                let choices: Vec<_> = g
                    .choices
                    .iter()
                    .enumerate()
                    .filter(|(_, choice)| choice.matches(&query, self.case_sensitivity))
                    .collect();
                (!choices.is_empty()).then_some(VisibleGroup {
                    group,
                    title: &g.title,
                    choices,
                })
            })
            .collect()
    }

    /// Pick the choice at (`group`, `choice`).
    ///
    /// Returns `false` if no such choice exists.
    pub fn select(&self, group: usize, choice: usize) -> bool {
        let Some(picked) = self
            .groups
            .get(group)
            .and_then(|g| g.choices.get(choice))
        else {
            tracing::debug!(target: targets::FORMS, group, choice, "ignoring unknown dropdown choice");
            return false;
        };
        let value = picked.value.clone();
        self.close();
        self.selected.emit(value);
        true
    }

    /// Pick the first choice whose search key equals `key`.
    pub fn select_key(&self, key: &str) -> bool {
        let position = self.groups.iter().enumerate().find_map(|(g, group)| {
            group
                .choices
                .iter()
                .position(|choice| choice.search_key == key)
                .map(|c| (g, c))
        });
        match position {
            Some((group, choice)) => self.select(group, choice),
            None => false,
        }
    }
}

impl<T> std::fmt::Debug for AddDropdown<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddDropdown")
            .field("groups", &self.groups.len())
            .field("query", &self.query.get())
            .field("is_open", &self.is_open.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn menu() -> AddDropdown<&'static str> {
        AddDropdown::new(vec![
            DropdownGroup::new(
                "Built-in Repositories",
                vec![
                    DropdownChoice::new("Microsoft", "microsoft"),
                    DropdownChoice::new("Electron", "electron"),
                ],
            ),
            DropdownGroup::new(
                "Custom Repositories",
                vec![
                    DropdownChoice::new("Amazon S3", "s3").with_search_key("s3 amazon bucket"),
                    DropdownChoice::new("HTTP", "http"),
                ],
            ),
        ])
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let menu = menu();
        let visible = menu.visible_groups();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].title, "Custom Repositories");
        assert_eq!(visible[1].choices.len(), 2);
    }

    #[test]
    fn test_query_filters_by_search_key() {
        let menu = menu();
        menu.set_query("AMAZON");
        let visible = menu.visible_groups();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].group, 1);
        assert_eq!(visible[0].choices[0].0, 0);
        assert_eq!(visible[0].choices[0].1.label, "Amazon S3");
    }

    #[test]
    fn test_case_sensitive_query() {
        let menu = menu().with_case_sensitivity(CaseSensitivity::CaseSensitive);
        menu.set_query("AMAZON");
        assert!(menu.visible_groups().is_empty());
    }

    #[test]
    fn test_select_emits_and_closes() {
        let menu = menu();
        let picked = Arc::new(Mutex::new(Vec::new()));

        let picked_clone = picked.clone();
        menu.selected.connect(move |value| picked_clone.lock().push(*value));

        menu.toggle();
        menu.set_query("http");
        assert!(menu.is_open());

        assert!(menu.select(1, 1));
        assert!(!menu.is_open());
        assert!(menu.query().is_empty());
        assert!(!menu.select(5, 0));
        assert!(menu.select_key("Electron"));

        assert_eq!(*picked.lock(), vec!["http", "electron"]);
    }

    #[test]
    fn test_open_changed_only_on_transition() {
        let menu = menu();
        let changes = Arc::new(Mutex::new(Vec::new()));

        let changes_clone = changes.clone();
        menu.open_changed.connect(move |&open| changes_clone.lock().push(open));

        menu.open();
        menu.open();
        menu.close();
        assert_eq!(*changes.lock(), vec![true, false]);
    }
}
