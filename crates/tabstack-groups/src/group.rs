//! Group data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tabstack_tabs::{Tab, TabId};

/// Creation timestamp in milliseconds, unique and increasing within a store
pub type GroupId = i64;

/// Reference to a tab held inside a group. It outlives the live tab: a closed
/// tab stays here until something strips it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: TabId,
    pub title: String,
    pub url: String,
}

impl From<&Tab> for GroupMember {
    fn from(tab: &Tab) -> Self {
        Self {
            id: tab.id,
            title: tab.title.clone(),
            url: tab.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// CSS color, e.g. `#3b82f6`
    pub color: String,
    /// Members in insertion order
    pub tabs: Vec<GroupMember>,
    pub collapsed: bool,
    /// Delete the group once a removal leaves it empty
    pub auto_close: bool,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub(crate) fn new(id: GroupId, name: String, color: String, auto_close: bool) -> Self {
        Self {
            id,
            name,
            color,
            tabs: Vec::new(),
            collapsed: false,
            auto_close,
            created_at: Utc::now(),
        }
    }

    pub fn contains(&self, tab_id: TabId) -> bool {
        self.tabs.iter().any(|member| member.id == tab_id)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Drop `tab_id` from the membership. Returns whether it was present.
    pub(crate) fn strip(&mut self, tab_id: TabId) -> bool {
        let before = self.tabs.len();
        self.tabs.retain(|member| member.id != tab_id);
        self.tabs.len() != before
    }

    /// Copy for export. Members without a live tab are dropped; the rest take
    /// the title and url their tab has now.
    pub fn exported(&self, live: &HashMap<TabId, &Tab>) -> Group {
        let tabs = self
            .tabs
            .iter()
            .filter_map(|member| live.get(&member.id).map(|tab| GroupMember::from(*tab)))
            .collect();

        Group {
            tabs,
            ..self.clone()
        }
    }

    /// True when the auto-close policy says this group must go.
    pub fn should_auto_close(&self) -> bool {
        self.auto_close && self.tabs.is_empty()
    }
}
