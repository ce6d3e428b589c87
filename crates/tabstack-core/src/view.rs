//! View state handed back to the presentation layer after every command

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use tabstack_groups::{GroupId, GroupStore, SelectionSet};
use tabstack_session::{Session, SessionId};
use tabstack_tabs::{matches_query, Tab, TabId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    #[serde(flatten)]
    pub tab: Tab,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    pub color: String,
    pub collapsed: bool,
    pub auto_close: bool,
    /// Live members matching the current query, in membership order
    pub tabs: Vec<TabView>,
    /// Number of displayed members; stored membership may be larger
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: SessionId,
    pub name: String,
    pub tab_count: usize,
    pub group_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            tab_count: session.tab_count,
            group_count: session.group_count,
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub query: String,
    pub groups: Vec<GroupView>,
    /// Live tabs no group references, filtered by the query
    pub ungrouped: Vec<TabView>,
    pub selection_count: usize,
    pub total_tabs: usize,
    pub total_groups: usize,
    /// Newest first
    pub sessions: Vec<SessionSummary>,
}

impl ViewState {
    pub(crate) fn build(
        tabs: &[Tab],
        groups: &GroupStore,
        selection: &SelectionSet,
        sessions: &[Session],
        query: &str,
    ) -> Self {
        let live: HashMap<TabId, &Tab> = tabs.iter().map(|t| (t.id, t)).collect();
        let view_of = |tab: &Tab| TabView {
            tab: tab.clone(),
            selected: selection.contains(tab.id),
        };

        let group_views: Vec<GroupView> = groups
            .groups()
            .iter()
            .map(|group| {
                let members: Vec<TabView> = group
                    .tabs
                    .iter()
                    .filter_map(|member| live.get(&member.id).copied())
                    .filter(|tab| matches_query(tab, query))
                    .map(view_of)
                    .collect();

                GroupView {
                    id: group.id,
                    name: group.name.clone(),
                    color: group.color.clone(),
                    collapsed: group.collapsed,
                    auto_close: group.auto_close,
                    count: members.len(),
                    tabs: members,
                }
            })
            .collect();

        let grouped = groups.grouped_ids();
        let ungrouped = tabs
            .iter()
            .filter(|tab| !grouped.contains(&tab.id))
            .filter(|tab| matches_query(tab, query))
            .map(view_of)
            .collect();

        Self {
            query: query.to_string(),
            groups: group_views,
            ungrouped,
            selection_count: selection.size(),
            total_tabs: tabs.len(),
            total_groups: groups.len(),
            sessions: sessions.iter().rev().map(SessionSummary::from).collect(),
        }
    }

    pub fn group(&self, group_id: GroupId) -> Option<&GroupView> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn group_named(&self, name: &str) -> Option<&GroupView> {
        self.groups
            .iter()
            .find(|g| g.name.to_lowercase() == name.to_lowercase())
    }

    pub fn ungrouped_ids(&self) -> Vec<TabId> {
        self.ungrouped.iter().map(|t| t.tab.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabstack_groups::{move_tab, MoveTarget};

    #[test]
    fn test_filter_scopes_group_count_only() {
        let tabs = vec![
            Tab::new(1, "Rust docs", "https://docs.rs", None),
            Tab::new(2, "Mail", "https://mail.example.com", None),
            Tab::new(3, "Rust blog", "https://blog.rust-lang.org", None),
        ];
        let mut groups = GroupStore::new();
        let work = groups.create_group("Work", "#3b82f6", false).unwrap();
        move_tab(&mut groups, &tabs[0], MoveTarget::Group(work.id)).unwrap();
        move_tab(&mut groups, &tabs[1], MoveTarget::Group(work.id)).unwrap();

        let view = ViewState::build(&tabs, &groups, &SelectionSet::new(), &[], "rust");

        let group = view.group(work.id).unwrap();
        assert_eq!(group.count, 1);
        assert_eq!(group.tabs[0].tab.id, 1);
        assert_eq!(view.ungrouped_ids(), vec![3]);
        assert_eq!(groups.get(work.id).unwrap().tab_count(), 2);
    }

    #[test]
    fn test_closed_members_not_rendered() {
        let tabs = vec![Tab::new(1, "A", "https://a.com", None)];
        let mut groups = GroupStore::new();
        let work = groups.create_group("Work", "#3b82f6", false).unwrap();
        move_tab(&mut groups, &tabs[0], MoveTarget::Group(work.id)).unwrap();
        move_tab(
            &mut groups,
            &Tab::new(9, "Gone", "https://gone.com", None),
            MoveTarget::Group(work.id),
        )
        .unwrap();

        let view = ViewState::build(&tabs, &groups, &SelectionSet::new(), &[], "");
        assert_eq!(view.group(work.id).unwrap().count, 1);
        assert_eq!(view.total_tabs, 1);
    }

    #[test]
    fn test_selection_flags() {
        let tabs = vec![
            Tab::new(1, "A", "https://a.com", None),
            Tab::new(2, "B", "https://b.com", None),
        ];
        let mut selection = SelectionSet::new();
        selection.add(2);

        let view = ViewState::build(&tabs, &GroupStore::new(), &selection, &[], "");
        assert_eq!(view.selection_count, 1);
        assert!(!view.ungrouped[0].selected);
        assert!(view.ungrouped[1].selected);
    }
}
