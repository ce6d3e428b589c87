//! Reassignment Engine
//!
//! Moves tabs between groups. An id is always stripped from every group
//! before it is appended to the target, and the auto-close sweep runs last.
//! The target is validated before anything is stripped, so a move either
//! applies fully or not at all.

use serde::{Deserialize, Serialize};
use tabstack_tabs::{Tab, TabId};

use crate::error::GroupError;
use crate::group::{Group, GroupId, GroupMember};
use crate::selection::SelectionSet;
use crate::store::GroupStore;
use crate::Result;

/// Where a tab should end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveTarget {
    Ungrouped,
    Group(GroupId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub tab_id: TabId,
    pub target: MoveTarget,
    pub auto_closed: Vec<Group>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkMoveOutcome {
    pub moved: Vec<TabId>,
    /// Selected ids with no live tab behind them
    pub skipped: Vec<TabId>,
    pub auto_closed: Vec<Group>,
}

fn ensure_target(store: &GroupStore, target: MoveTarget) -> Result<()> {
    match target {
        MoveTarget::Group(group_id) if !store.contains(group_id) => {
            Err(GroupError::NotFound(group_id))
        }
        _ => Ok(()),
    }
}

/// Strip, then append. Callers have already validated the target.
fn place(store: &mut GroupStore, tab: &Tab, target: MoveTarget) -> Result<()> {
    store.strip_tab(tab.id);
    if let MoveTarget::Group(group_id) = target {
        store.append_member(group_id, GroupMember::from(tab))?;
    }
    Ok(())
}

/// Move one live tab to `target`, building the member from the tab's current
/// title and url.
pub fn move_tab(store: &mut GroupStore, tab: &Tab, target: MoveTarget) -> Result<MoveOutcome> {
    ensure_target(store, target)?;

    place(store, tab, target)?;
    let auto_closed = store.apply_auto_close();

    tracing::info!(tab_id = tab.id, ?target, "Moved tab");

    Ok(MoveOutcome {
        tab_id: tab.id,
        target,
        auto_closed,
    })
}

/// Move every selected tab to `target` and clear the selection. Placement of
/// each id is independent, so iteration order does not matter.
pub fn move_selected(
    store: &mut GroupStore,
    live_tabs: &[Tab],
    selection: &mut SelectionSet,
    target: MoveTarget,
) -> Result<BulkMoveOutcome> {
    ensure_target(store, target)?;

    let mut outcome = BulkMoveOutcome::default();
    for tab_id in selection.ids() {
        match live_tabs.iter().find(|t| t.id == tab_id) {
            Some(tab) => {
                place(store, tab, target)?;
                outcome.moved.push(tab_id);
            }
            None => outcome.skipped.push(tab_id),
        }
    }

    outcome.auto_closed = store.apply_auto_close();
    selection.clear();

    tracing::info!(
        moved = outcome.moved.len(),
        skipped = outcome.skipped.len(),
        ?target,
        "Moved selected tabs"
    );

    Ok(outcome)
}
