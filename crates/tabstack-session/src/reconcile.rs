//! Post-restore reconciliation
//!
//! Restored groups still hold the tab ids of the session they came from.
//! Freshly opened tabs get new ids, so membership is re-bound by URL: each
//! member claims the first unclaimed fresh tab with an equal URL.

use std::collections::{HashMap, VecDeque};

use tabstack_groups::{Group, GroupMember, GroupStore};
use tabstack_tabs::{Tab, TabId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Members now pointing at a freshly opened tab
    pub rebound: usize,
    /// Members with no fresh tab for their URL, removed from their group
    pub dropped: Vec<GroupMember>,
    /// Auto-close groups left empty by the drop
    pub auto_closed: Vec<Group>,
}

/// Re-bind every member of `store` to a tab from `opened`. Members that
/// cannot be matched are removed, so no stale id survives to collide with a
/// live tab.
pub fn reconcile_members(store: &mut GroupStore, opened: &[Tab]) -> Reconciliation {
    let mut by_url: HashMap<&str, VecDeque<TabId>> = HashMap::new();
    for tab in opened {
        by_url.entry(tab.url.as_str()).or_default().push_back(tab.id);
    }

    let mut rebound = 0;
    let (dropped, auto_closed) = store.rebind_members(|member| {
        let fresh = by_url
            .get_mut(member.url.as_str())
            .and_then(VecDeque::pop_front);
        if fresh.is_some() {
            rebound += 1;
        }
        fresh
    });

    tracing::info!(
        rebound,
        dropped = dropped.len(),
        auto_closed = auto_closed.len(),
        "Reconciled restored groups"
    );

    Reconciliation {
        rebound,
        dropped,
        auto_closed,
    }
}
