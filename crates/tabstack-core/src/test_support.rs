//! In-memory collaborators for organizer tests

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use tabstack_storage::StateMap;
use tabstack_tabs::{Tab, TabError, TabId, TabProvider};

use crate::persistence::StateStore;

#[derive(Default)]
struct BrowserState {
    tabs: Vec<Tab>,
    next_id: TabId,
    removed: Vec<TabId>,
    activated: Vec<TabId>,
    fail_removals: bool,
}

/// A browser window held in memory
pub struct FakeBrowser {
    state: Mutex<BrowserState>,
}

impl FakeBrowser {
    pub fn with_tabs(tabs: Vec<Tab>) -> Self {
        Self {
            state: Mutex::new(BrowserState {
                tabs,
                next_id: 1000,
                ..BrowserState::default()
            }),
        }
    }

    pub fn removed(&self) -> Vec<TabId> {
        self.state.lock().removed.clone()
    }

    pub fn activated(&self) -> Vec<TabId> {
        self.state.lock().activated.clone()
    }

    pub fn fail_removals(&self, fail: bool) {
        self.state.lock().fail_removals = fail;
    }

    /// The page in tab `id` navigated without the organizer seeing it
    pub fn navigate(&self, id: TabId, url: &str) {
        let mut state = self.state.lock();
        if let Some(tab) = state.tabs.iter_mut().find(|t| t.id == id) {
            *tab = Tab::new(id, tab.title.clone(), url, None);
        }
    }

    /// The user closed tab `id` outside the organizer
    pub fn close_externally(&self, id: TabId) {
        self.state.lock().tabs.retain(|t| t.id != id);
    }

    pub fn open_externally(&self, tab: Tab) {
        self.state.lock().tabs.push(tab);
    }
}

#[async_trait]
impl TabProvider for FakeBrowser {
    async fn query_open_tabs(&self) -> tabstack_tabs::Result<Vec<Tab>> {
        Ok(self.state.lock().tabs.clone())
    }

    async fn activate_tab(&self, id: TabId) -> tabstack_tabs::Result<()> {
        let mut state = self.state.lock();
        for tab in state.tabs.iter_mut() {
            tab.active = tab.id == id;
        }
        state.activated.push(id);
        Ok(())
    }

    async fn remove_tabs(&self, ids: &[TabId]) -> tabstack_tabs::Result<()> {
        let mut state = self.state.lock();
        if state.fail_removals {
            return Err(TabError::provider("remove tabs", "window closed"));
        }
        state.tabs.retain(|t| !ids.contains(&t.id));
        state.removed.extend_from_slice(ids);
        Ok(())
    }

    async fn create_tab(&self, url: &str, active: bool) -> tabstack_tabs::Result<Tab> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let tab = Tab::new(state.next_id, url, url, None).with_active(active);
        state.tabs.push(tab.clone());
        Ok(tab)
    }

    async fn reorder_tab(&self, id: TabId, index: usize) -> tabstack_tabs::Result<()> {
        let mut state = self.state.lock();
        let from = state
            .tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or(TabError::NotFound(id))?;
        let tab = state.tabs.remove(from);
        let index = index.min(state.tabs.len());
        state.tabs.insert(index, tab);
        Ok(())
    }
}

/// Key-value store shared between clones, counting writes
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<StateMap>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> tabstack_storage::Result<StateMap> {
        let values = self.values.lock();
        Ok(keys
            .iter()
            .filter_map(|k| values.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, values: StateMap) -> tabstack_storage::Result<()> {
        self.values.lock().extend(values);
        *self.writes.lock() += 1;
        Ok(())
    }
}
