//! Selection Set
//!
//! Tab ids marked for a bulk action. Lives only as long as the organizer
//! instance and is never persisted.

use std::collections::{BTreeSet, HashSet};

use tabstack_tabs::TabId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<TabId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the id was not already selected
    pub fn add(&mut self, id: TabId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: TabId) -> bool {
        self.ids.remove(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Add every id of the currently visible (filtered) view
    pub fn select_all<I>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = TabId>,
    {
        self.ids.extend(visible_ids);
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.ids.contains(&id)
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<TabId> {
        self.ids.iter().copied().collect()
    }

    /// Forget ids whose tabs no longer exist
    pub fn retain_live(&mut self, live_ids: &HashSet<TabId>) {
        self.ids.retain(|id| live_ids.contains(id));
    }
}
