//! Which issue groups in the stream are selected for bulk actions.
//!
//! The store is created once per stream view and handed to every row; there
//! is no process-wide instance. Mutations report the ids they touched so a
//! row's checkbox only re-reads the store when its own id is affected.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use horizon_dashboard_core::logging::targets;
use horizon_dashboard_core::{ChangeSet, Notifier, Subscription};

#[derive(Debug, Default)]
struct Records {
    /// Ids in stream order.
    order: Vec<String>,
    selected: HashMap<String, bool>,
}

impl Records {
    fn all_selected(&self) -> bool {
        !self.selected.is_empty() && self.selected.values().all(|s| *s)
    }

    fn insert_missing(&mut self, ids: &[String]) -> Vec<String> {
        let initial = self.all_selected();
        let mut added = Vec::new();
        for id in ids {
            if !self.selected.contains_key(id) {
                self.selected.insert(id.clone(), initial);
                self.order.push(id.clone());
                added.push(id.clone());
            }
        }
        added
    }

    fn retain(&mut self, keep: &HashSet<&str>) -> Vec<String> {
        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.order)
            .into_iter()
            .partition(|id| keep.contains(id.as_str()));
        for id in &removed {
            self.selected.remove(id);
        }
        self.order = kept;
        removed
    }

    fn set_all(&mut self, value: bool) {
        for selected in self.selected.values_mut() {
            *selected = value;
        }
    }
}

/// Selection state of the groups shown in an issue stream.
pub struct SelectedGroupStore {
    records: Mutex<Records>,
    notifier: Notifier<String>,
}

impl Default for SelectedGroupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectedGroupStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Records::default()),
            notifier: Notifier::new(),
        }
    }

    /// Subscribe to selection changes matching `predicate`.
    pub fn subscribe<P, F>(&self, predicate: P, callback: F) -> Subscription
    where
        P: Fn(&ChangeSet<String>) -> bool + Send + Sync + 'static,
        F: Fn(&ChangeSet<String>) + Send + Sync + 'static,
    {
        self.notifier.subscribe(predicate, callback)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    /// Reset the store to `ids`, none of them selected.
    pub fn load_initial_data(&self, ids: &[String]) {
        {
            let mut records = self.records.lock();
            *records = Records::default();
            records.insert_missing(ids);
        }
        tracing::debug!(target: targets::STREAM, count = ids.len(), "loaded stream selection");
        self.notifier.notify(ChangeSet::All);
    }

    /// Start tracking `ids` that are not tracked yet.
    ///
    /// New ids start selected when every tracked group is selected.
    pub fn add(&self, ids: &[String]) {
        let added = self.records.lock().insert_missing(ids);
        self.notifier.notify(ChangeSet::items(added));
    }

    /// Stop tracking every id not in `existing`.
    pub fn prune(&self, existing: &[String]) {
        let keep: HashSet<&str> = existing.iter().map(String::as_str).collect();
        let removed = self.records.lock().retain(&keep);
        self.notifier.notify(ChangeSet::items(removed));
    }

    /// The stream now shows exactly `ids`: drop vanished groups and track
    /// new ones.
    pub fn on_group_change(&self, ids: &[String]) {
        let keep: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let touched: Vec<String> = {
            let mut records = self.records.lock();
            let mut touched = records.retain(&keep);
            touched.extend(records.insert_missing(ids));
            touched
        };
        self.notifier.notify(ChangeSet::items(touched));
    }

    /// Whether `id` is selected. Unknown ids are not.
    pub fn is_selected(&self, id: &str) -> bool {
        self.records.lock().selected.get(id).copied().unwrap_or(false)
    }

    /// Flip the selection of `id`. Unknown ids are ignored.
    pub fn toggle_select(&self, id: &str) {
        {
            let mut records = self.records.lock();
            let Some(selected) = records.selected.get_mut(id) else {
                tracing::debug!(target: targets::STREAM, id, "toggle for untracked group ignored");
                return;
            };
            *selected = !*selected;
        }
        self.notifier.notify(ChangeSet::items([id.to_string()]));
    }

    /// Select everything, or deselect everything if everything is
    /// already selected.
    pub fn toggle_select_all(&self) {
        {
            let mut records = self.records.lock();
            let next = !records.all_selected();
            records.set_all(next);
        }
        self.notifier.notify(ChangeSet::All);
    }

    /// Deselect everything.
    pub fn deselect_all(&self) {
        self.records.lock().set_all(false);
        self.notifier.notify(ChangeSet::All);
    }

    /// Selected ids in stream order.
    pub fn selected_ids(&self) -> Vec<String> {
        let records = self.records.lock();
        records
            .order
            .iter()
            .filter(|id| records.selected.get(*id).copied().unwrap_or(false))
            .cloned()
            .collect()
    }

    /// Whether every tracked group is selected. False for an empty stream.
    pub fn all_selected(&self) -> bool {
        self.records.lock().all_selected()
    }

    /// Whether at least one group is selected.
    pub fn any_selected(&self) -> bool {
        self.records.lock().selected.values().any(|s| *s)
    }

    /// Whether more than one group is selected.
    pub fn multi_selected(&self) -> bool {
        self.records.lock().selected.values().filter(|s| **s).count() > 1
    }

    /// Number of tracked groups.
    pub fn len(&self) -> usize {
        self.records.lock().order.len()
    }

    /// Returns `true` if no groups are tracked.
    pub fn is_empty(&self) -> bool {
        self.records.lock().order.is_empty()
    }
}

impl std::fmt::Debug for SelectedGroupStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedGroupStore")
            .field("records", &*self.records.lock())
            .field("subscribers", &self.notifier.subscriber_count())
            .finish()
    }
}
