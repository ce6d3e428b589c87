//! Tab organizer
//!
//! The explicit state object behind every UI command. Commands take
//! `&mut self`, so at most one of them runs at a time per organizer; state is
//! re-read after each call into the browser or the persistence layer.

use std::collections::HashSet;

use tabstack_groups::{
    move_selected, move_tab, DragSession, GroupError, GroupId, GroupStore, InsertionMarker,
    ItemRect, MoveTarget, SelectionSet,
};
use tabstack_session::{reconcile_members, Session, SessionId, SessionStore};
use tabstack_storage::Database;
use tabstack_tabs::{filter_tabs, find_duplicates, Tab, TabError, TabId, TabProvider};

use crate::config::Config;
use crate::persistence::{PersistedState, StateStore};
use crate::view::ViewState;
use crate::Result;

/// Result of a bulk close that reports how many tabs went away
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    pub closed: usize,
    pub view: ViewState,
}

pub struct TabOrganizer<P, S> {
    provider: P,
    store: S,
    config: Config,
    /// Live inventory as of the last query
    tabs: Vec<Tab>,
    groups: GroupStore,
    sessions: SessionStore,
    selection: SelectionSet,
    query: String,
    drag: Option<DragSession>,
}

impl<P, S> TabOrganizer<P, S>
where
    P: TabProvider,
    S: StateStore,
{
    /// Load persisted groups and sessions, then query the live tabs.
    pub async fn load(provider: P, store: S, config: Config) -> Result<Self> {
        config.validate()?;

        let state = PersistedState::load(&store).await?;
        let sessions = SessionStore::from_sessions(state.sessions, config.max_sessions)?;
        let groups = GroupStore::from_groups(state.groups);

        let mut organizer = Self {
            provider,
            store,
            config,
            tabs: Vec::new(),
            groups,
            sessions,
            selection: SelectionSet::new(),
            query: String::new(),
            drag: None,
        };
        organizer.refresh_tabs().await?;

        tracing::info!(
            tab_count = organizer.tabs.len(),
            group_count = organizer.groups.len(),
            session_count = organizer.sessions.len(),
            "Tab organizer loaded"
        );

        Ok(organizer)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn groups(&self) -> &GroupStore {
        &self.groups
    }

    pub fn sessions(&self) -> &[Session] {
        self.sessions.sessions()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn state_store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> ViewState {
        ViewState::build(
            &self.tabs,
            &self.groups,
            &self.selection,
            self.sessions.sessions(),
            &self.query,
        )
    }

    /// Live tabs matching the current query
    pub fn visible_tabs(&self) -> Vec<&Tab> {
        filter_tabs(&self.tabs, &self.query)
    }

    /// Re-query the browser. Selected ids whose tab is gone are forgotten.
    pub async fn refresh_tabs(&mut self) -> Result<ViewState> {
        let tabs = self.provider.query_open_tabs().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to query open tabs");
            e
        })?;

        let live: HashSet<TabId> = tabs.iter().map(|t| t.id).collect();
        self.selection.retain_live(&live);
        self.tabs = tabs;

        Ok(self.view())
    }

    // === Group commands ===

    pub async fn create_group(
        &mut self,
        name: &str,
        color: Option<&str>,
        auto_close: bool,
    ) -> Result<ViewState> {
        let color = color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(self.config.default_group_color.as_str())
            .to_string();
        self.groups.create_group(name, &color, auto_close)?;
        self.persist().await?;
        Ok(self.view())
    }

    /// Delete a group; its tabs become ungrouped. Unknown groups are a no-op.
    pub async fn delete_group(&mut self, group_id: GroupId) -> Result<ViewState> {
        if self.groups.delete_group(group_id).is_some() {
            self.persist().await?;
        }
        Ok(self.view())
    }

    pub async fn toggle_collapse(&mut self, group_id: GroupId) -> Result<ViewState> {
        if self.groups.toggle_collapse(group_id).is_some() {
            self.persist().await?;
        }
        Ok(self.view())
    }

    // === Reassignment ===

    pub async fn move_tab(&mut self, tab_id: TabId, target: MoveTarget) -> Result<ViewState> {
        let tab = self
            .tabs
            .iter()
            .find(|t| t.id == tab_id)
            .ok_or(GroupError::TabNotFound(tab_id))?;

        move_tab(&mut self.groups, tab, target)?;
        self.persist().await?;
        Ok(self.view())
    }

    pub async fn move_selected(&mut self, target: MoveTarget) -> Result<ViewState> {
        move_selected(&mut self.groups, &self.tabs, &mut self.selection, target)?;
        self.persist().await?;
        Ok(self.view())
    }

    // === Drag and drop ===

    pub fn begin_drag(&mut self, tab_id: TabId) -> Result<()> {
        if !self.tabs.iter().any(|t| t.id == tab_id) {
            return Err(GroupError::TabNotFound(tab_id).into());
        }
        self.drag = Some(DragSession::start(tab_id));
        Ok(())
    }

    /// Pointer moved during a drag. Returns the insertion marker to draw.
    pub fn drag_over(
        &mut self,
        target: MoveTarget,
        over: Option<(TabId, ItemRect)>,
        pointer_y: f64,
    ) -> Option<InsertionMarker> {
        self.drag
            .as_mut()
            .and_then(|drag| drag.hover(target, over, pointer_y).copied())
    }

    pub fn drag_marker(&self) -> Option<InsertionMarker> {
        self.drag.as_ref().and_then(|drag| drag.marker().copied())
    }

    /// Release the pointer. `None` means outside every drop target: the drag
    /// is cancelled and nothing changes.
    pub async fn drop_on(&mut self, target: Option<MoveTarget>) -> Result<ViewState> {
        let pending = self.drag.take().and_then(|drag| drag.drop_on(target));
        match pending {
            Some(pending) => self.move_tab(pending.tab_id, pending.target).await,
            None => Ok(self.view()),
        }
    }

    // === Selection ===

    pub fn select(&mut self, tab_id: TabId) -> ViewState {
        self.selection.add(tab_id);
        self.view()
    }

    pub fn deselect(&mut self, tab_id: TabId) -> ViewState {
        self.selection.remove(tab_id);
        self.view()
    }

    /// Select every tab visible under the current query
    pub fn select_all(&mut self) -> ViewState {
        let visible: Vec<TabId> = self.visible_tabs().iter().map(|t| t.id).collect();
        self.selection.select_all(visible);
        self.view()
    }

    pub fn clear_selection(&mut self) -> ViewState {
        self.selection.clear();
        self.view()
    }

    // === Search ===

    pub fn filter(&mut self, query: &str) -> ViewState {
        self.query = query.trim().to_lowercase();
        self.view()
    }

    // === Sessions ===

    /// Snapshot the window as it is now. Tabs are re-queried first so grouped
    /// tabs that navigated are saved under their current url.
    pub async fn save_session(&mut self, name: &str) -> Result<ViewState> {
        self.refresh_tabs().await?;
        self.sessions.save(name, &self.tabs, self.groups.groups());
        self.persist().await?;
        Ok(self.view())
    }

    /// Open the session's tabs, install its groups in place of the current
    /// ones and re-bind membership to the new tab ids. A failed tab open stops
    /// the restore; tabs already opened stay open.
    pub async fn restore_session(&mut self, session_id: SessionId) -> Result<ViewState> {
        let plan = self.sessions.restore(session_id)?;

        let mut opened = Vec::with_capacity(plan.tabs_to_open.len());
        for url in &plan.tabs_to_open {
            match self.provider.create_tab(url, false).await {
                // A fresh tab may still report a pending URL
                Ok(tab) => {
                    opened.push(Tab::new(tab.id, tab.title, url.as_str(), Some(tab.favicon)))
                }
                Err(e) => {
                    tracing::error!(
                        session_id,
                        url = %url,
                        opened = opened.len(),
                        error = %e,
                        "Failed to open tab during restore"
                    );
                    if let Err(refresh) = self.refresh_tabs().await {
                        tracing::warn!(error = %refresh, "Failed to refresh tabs after restore error");
                    }
                    return Err(e.into());
                }
            }
        }

        self.groups.replace_all(plan.groups_to_install);
        let reconciliation = reconcile_members(&mut self.groups, &opened);

        tracing::info!(
            session_id,
            session_name = %plan.name,
            opened = opened.len(),
            rebound = reconciliation.rebound,
            "Restored session"
        );

        self.persist().await?;
        self.refresh_tabs().await
    }

    /// Unknown ids are a no-op
    pub async fn delete_session(&mut self, session_id: SessionId) -> Result<ViewState> {
        if self.sessions.delete(session_id).is_some() {
            self.persist().await?;
        }
        Ok(self.view())
    }

    // === Tab lifecycle ===

    pub async fn activate_tab(&mut self, tab_id: TabId) -> Result<()> {
        if !self.tabs.iter().any(|t| t.id == tab_id) {
            return Err(TabError::NotFound(tab_id).into());
        }
        self.provider.activate_tab(tab_id).await?;
        Ok(())
    }

    pub async fn close_tab(&mut self, tab_id: TabId) -> Result<ViewState> {
        self.close_tabs(vec![tab_id]).await?;
        Ok(self.view())
    }

    pub async fn close_selected(&mut self) -> Result<ViewState> {
        self.close_tabs(self.selection.ids()).await?;
        Ok(self.view())
    }

    pub async fn close_all_ungrouped(&mut self) -> Result<ViewState> {
        let grouped = self.groups.grouped_ids();
        let ids: Vec<TabId> = self
            .tabs
            .iter()
            .filter(|t| !grouped.contains(&t.id))
            .map(|t| t.id)
            .collect();
        self.close_tabs(ids).await?;
        Ok(self.view())
    }

    /// Close every tab of a group. An auto-close group goes away with them.
    pub async fn close_group_tabs(&mut self, group_id: GroupId) -> Result<ViewState> {
        let ids: Vec<TabId> = match self.groups.get(group_id) {
            Some(group) => group.tabs.iter().map(|m| m.id).collect(),
            None => return Ok(self.view()),
        };
        self.close_tabs(ids).await?;
        Ok(self.view())
    }

    /// Close every tab whose URL another tab already has, keeping the first.
    pub async fn close_duplicates(&mut self) -> Result<CloseOutcome> {
        let report = find_duplicates(&self.tabs);
        let closed = self.close_tabs(report.duplicates).await?;
        Ok(CloseOutcome {
            closed,
            view: self.view(),
        })
    }

    /// Reorder the browser's tab strip by title
    pub async fn sort_tabs(&mut self) -> Result<ViewState> {
        let mut sorted: Vec<(TabId, String)> = self
            .tabs
            .iter()
            .map(|t| (t.id, t.title.to_lowercase()))
            .collect();
        sorted.sort_by(|a, b| a.1.cmp(&b.1));

        for (index, (tab_id, _)) in sorted.iter().enumerate() {
            self.provider.reorder_tab(*tab_id, index).await.map_err(|e| {
                tracing::error!(tab_id, index, error = %e, "Failed to reorder tab");
                e
            })?;
        }

        tracing::info!(tab_count = sorted.len(), "Sorted tabs by title");
        self.refresh_tabs().await
    }

    /// A tab was closed outside the organizer
    pub async fn handle_tab_removed(&mut self, tab_id: TabId) -> Result<ViewState> {
        self.groups.remove_tab_everywhere(tab_id);
        self.selection.remove(tab_id);
        self.tabs.retain(|t| t.id != tab_id);
        self.persist().await?;
        Ok(self.view())
    }

    async fn close_tabs(&mut self, ids: Vec<TabId>) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        self.provider.remove_tabs(&ids).await.map_err(|e| {
            tracing::error!(count = ids.len(), error = %e, "Failed to close tabs");
            e
        })?;

        self.groups.remove_tabs_everywhere(&ids);
        for &id in &ids {
            self.selection.remove(id);
        }
        self.persist().await?;
        self.refresh_tabs().await?;

        tracing::info!(count = ids.len(), "Closed tabs");
        Ok(ids.len())
    }

    /// Groups and sessions in one combined write
    async fn persist(&self) -> Result<()> {
        debug_assert!(self.groups.check_invariants().is_ok());

        let state = PersistedState {
            groups: self.groups.groups().to_vec(),
            sessions: self.sessions.sessions().to_vec(),
        };
        state.save(&self.store).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist state");
            e
        })
    }
}

impl<P: TabProvider> TabOrganizer<P, Database> {
    /// Open the SQLite database at `config.database_path` and load from it.
    pub async fn open(provider: P, config: Config) -> Result<Self> {
        config.validate()?;
        let db = Database::open(&config.database_path)?;

        tracing::info!(
            path = %config.database_path.display(),
            "Opened state database"
        );

        Self::load(provider, db, config).await
    }
}
