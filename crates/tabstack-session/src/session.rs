//! Session data structure

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tabstack_groups::Group;
use tabstack_tabs::{Tab, TabId, TabRecord};

/// Creation timestamp in milliseconds
pub type SessionId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    /// Tabs open at save time, without their live handles
    pub tabs: Vec<TabRecord>,
    /// Group list as it was at save time, holding only members whose tab was
    /// open, with that tab's title and url
    pub groups: Vec<Group>,
    pub created_at: DateTime<Utc>,
    pub tab_count: usize,
    pub group_count: usize,
}

impl Session {
    /// Snapshot `tabs` and `groups`. Both are copied, so later mutation of the
    /// live state never reaches the saved entry. Group members are exported
    /// against `tabs`: restore matches them by url, so they must carry the url
    /// that will actually be reopened.
    pub fn capture(id: SessionId, name: String, tabs: &[Tab], groups: &[Group]) -> Self {
        let live: HashMap<TabId, &Tab> = tabs.iter().map(|t| (t.id, t)).collect();
        let groups: Vec<Group> = groups.iter().map(|g| g.exported(&live)).collect();
        let tabs: Vec<TabRecord> = tabs.iter().map(Tab::to_record).collect();

        Self {
            id,
            name,
            tab_count: tabs.len(),
            group_count: groups.len(),
            tabs,
            groups,
            created_at: Utc::now(),
        }
    }

    /// Name used when the user saves without typing one
    pub fn default_name() -> String {
        format!("Session {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }

    /// URLs to open on restore, in saved order. Records with a blank url
    /// are skipped.
    pub fn urls(&self) -> Vec<String> {
        self.tabs
            .iter()
            .filter(|record| match record.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(session_id = self.id, error = %e, "Skipping saved tab");
                    false
                }
            })
            .map(|record| record.url.clone())
            .collect()
    }
}
