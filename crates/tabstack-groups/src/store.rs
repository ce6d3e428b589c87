//! Group Store
//!
//! Owns the ordered group list. Every mutation that can shrink a membership
//! ends with an auto-close sweep.

use chrono::Utc;
use std::collections::{HashMap, HashSet};

use tabstack_tabs::TabId;

use crate::error::GroupError;
use crate::group::{Group, GroupId, GroupMember};
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    groups: Vec<Group>,
    /// Highest id handed out, so ids stay increasing within the same millisecond
    last_id: GroupId,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt groups loaded from persistence or a restored session
    pub fn from_groups(groups: Vec<Group>) -> Self {
        let last_id = groups.iter().map(|g| g.id).max().unwrap_or_default();
        Self { groups, last_id }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn contains(&self, group_id: GroupId) -> bool {
        self.get(group_id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.has_name(name.trim()))
    }

    /// Every tab id referenced by some group
    pub fn grouped_ids(&self) -> HashSet<TabId> {
        self.groups
            .iter()
            .flat_map(|g| g.tabs.iter().map(|m| m.id))
            .collect()
    }

    /// Create an empty, expanded group at the end of the list.
    pub fn create_group(
        &mut self,
        name: &str,
        color: &str,
        auto_close: bool,
    ) -> Result<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }
        if self.find_by_name(name).is_some() {
            return Err(GroupError::DuplicateName(name.to_string()));
        }

        let group = Group::new(self.next_id(), name.to_string(), color.to_string(), auto_close);
        self.groups.push(group.clone());

        tracing::info!(
            group_id = group.id,
            group_name = %group.name,
            auto_close,
            "Created group"
        );

        Ok(group)
    }

    /// Remove a group. Its tabs become ungrouped; nothing is closed.
    pub fn delete_group(&mut self, group_id: GroupId) -> Option<Group> {
        let index = self.groups.iter().position(|g| g.id == group_id)?;
        let group = self.groups.remove(index);

        tracing::info!(
            group_id = group.id,
            group_name = %group.name,
            released = group.tab_count(),
            "Deleted group"
        );

        Some(group)
    }

    /// Flip the collapsed flag and return the new state
    pub fn toggle_collapse(&mut self, group_id: GroupId) -> Option<bool> {
        let group = self.groups.iter_mut().find(|g| g.id == group_id)?;
        group.collapsed = !group.collapsed;

        tracing::debug!(group_id, collapsed = group.collapsed, "Toggled group");

        Some(group.collapsed)
    }

    /// Strip `tab_id` from every group, then sweep auto-close groups.
    /// Returns the groups that were auto-closed.
    pub fn remove_tab_everywhere(&mut self, tab_id: TabId) -> Vec<Group> {
        self.strip_tab(tab_id);
        self.apply_auto_close()
    }

    /// Strip a batch of tab ids with a single sweep at the end
    pub fn remove_tabs_everywhere(&mut self, tab_ids: &[TabId]) -> Vec<Group> {
        for &tab_id in tab_ids {
            self.strip_tab(tab_id);
        }
        self.apply_auto_close()
    }

    /// Membership filtered to `live_ids`. Read-side only: the store keeps
    /// references to closed tabs until they are explicitly removed.
    pub fn pruned(&self, live_ids: &HashSet<TabId>) -> Vec<Group> {
        self.groups
            .iter()
            .map(|group| {
                let mut group = group.clone();
                group.tabs.retain(|m| live_ids.contains(&m.id));
                group
            })
            .collect()
    }

    /// Replace the whole store (session restore installs wholesale).
    pub fn replace_all(&mut self, groups: Vec<Group>) {
        let last_id = self.last_id;
        *self = Self::from_groups(groups);
        self.last_id = self.last_id.max(last_id);
    }

    /// Remove `tab_id` from every membership without sweeping. Returns the
    /// number of groups it was removed from.
    pub(crate) fn strip_tab(&mut self, tab_id: TabId) -> usize {
        self.groups
            .iter_mut()
            .map(|g| g.strip(tab_id))
            .filter(|removed| *removed)
            .count()
    }

    /// Append a member at the tail of a group.
    pub(crate) fn append_member(&mut self, group_id: GroupId, member: GroupMember) -> Result<()> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(GroupError::NotFound(group_id))?;
        group.tabs.push(member);
        Ok(())
    }

    /// Re-point every member at the id returned by `rebind`, dropping members
    /// for which it returns `None`, then sweep. Returns the dropped members
    /// and the auto-closed groups.
    pub fn rebind_members<F>(&mut self, mut rebind: F) -> (Vec<GroupMember>, Vec<Group>)
    where
        F: FnMut(&GroupMember) -> Option<TabId>,
    {
        let mut dropped = Vec::new();
        for group in &mut self.groups {
            group.tabs.retain_mut(|member| match rebind(member) {
                Some(id) => {
                    member.id = id;
                    true
                }
                None => {
                    dropped.push(member.clone());
                    false
                }
            });
        }
        (dropped, self.apply_auto_close())
    }

    /// Remove every auto-close group whose membership is empty
    pub fn apply_auto_close(&mut self) -> Vec<Group> {
        let (closed, kept): (Vec<Group>, Vec<Group>) = std::mem::take(&mut self.groups)
            .into_iter()
            .partition(Group::should_auto_close);
        self.groups = kept;

        for group in &closed {
            tracing::info!(
                group_id = group.id,
                group_name = %group.name,
                "Auto-closed empty group"
            );
        }

        closed
    }

    /// Check membership partition and name uniqueness.
    pub fn check_invariants(&self) -> Result<()> {
        let mut owners: HashMap<TabId, GroupId> = HashMap::new();
        for group in &self.groups {
            for member in &group.tabs {
                if let Some(other) = owners.insert(member.id, group.id) {
                    return Err(GroupError::InvariantViolation(format!(
                        "tab {} is in groups {} and {}",
                        member.id, other, group.id
                    )));
                }
            }
        }

        let mut names = HashSet::new();
        for group in &self.groups {
            if !names.insert(group.name.to_lowercase()) {
                return Err(GroupError::InvariantViolation(format!(
                    "group name \"{}\" is not unique",
                    group.name
                )));
            }
        }

        Ok(())
    }

    fn next_id(&mut self) -> GroupId {
        let id = Utc::now().timestamp_millis().max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabstack_tabs::Tab;

    fn member(id: TabId) -> GroupMember {
        GroupMember::from(&Tab::new(id, format!("Tab {id}"), format!("https://t{id}.com"), None))
    }

    #[test]
    fn test_create_group() {
        let mut store = GroupStore::new();
        let group = store.create_group("  Work ", "#3b82f6", false).unwrap();

        assert_eq!(group.name, "Work");
        assert!(group.tabs.is_empty());
        assert!(!group.collapsed);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut store = GroupStore::new();
        assert_eq!(
            store.create_group("   ", "#3b82f6", false),
            Err(GroupError::EmptyName)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitive() {
        let mut store = GroupStore::new();
        store.create_group("Work", "#3b82f6", false).unwrap();
        let before = store.groups().to_vec();

        let result = store.create_group("wORK", "#ef4444", true);
        assert_eq!(result, Err(GroupError::DuplicateName("wORK".to_string())));
        assert_eq!(store.groups(), before.as_slice());
    }

    #[test]
    fn test_ids_increase() {
        let mut store = GroupStore::new();
        let a = store.create_group("A", "#000", false).unwrap();
        let b = store.create_group("B", "#000", false).unwrap();
        let c = store.create_group("C", "#000", false).unwrap();
        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_delete_group_releases_tabs() {
        let mut store = GroupStore::new();
        let group = store.create_group("Work", "#3b82f6", false).unwrap();
        store.append_member(group.id, member(1)).unwrap();

        let deleted = store.delete_group(group.id).unwrap();
        assert_eq!(deleted.tabs.len(), 1);
        assert!(!store.grouped_ids().contains(&1));

        // Unknown group is a no-op
        assert!(store.delete_group(group.id).is_none());
    }

    #[test]
    fn test_next_id_saturates() {
        let mut store = GroupStore::from_groups(vec![Group::new(
            GroupId::MAX,
            "Corrupt".into(),
            "#000".into(),
            false,
        )]);
        let group = store.create_group("Next", "#000", false).unwrap();
        assert_eq!(group.id, GroupId::MAX);
    }

    #[test]
    fn test_toggle_collapse() {
        let mut store = GroupStore::new();
        let group = store.create_group("Work", "#3b82f6", false).unwrap();

        assert_eq!(store.toggle_collapse(group.id), Some(true));
        assert_eq!(store.toggle_collapse(group.id), Some(false));
        assert_eq!(store.toggle_collapse(group.id + 1000), None);
    }

    #[test]
    fn test_remove_tab_everywhere_keeps_plain_group() {
        let mut store = GroupStore::new();
        let group = store.create_group("Work", "#3b82f6", false).unwrap();
        store.append_member(group.id, member(1)).unwrap();

        let closed = store.remove_tab_everywhere(1);
        assert!(closed.is_empty());
        assert!(store.get(group.id).unwrap().is_empty());
    }

    #[test]
    fn test_remove_tab_everywhere_auto_closes() {
        let mut store = GroupStore::new();
        let group = store.create_group("Work", "#3b82f6", true).unwrap();
        store.append_member(group.id, member(1)).unwrap();
        store.append_member(group.id, member(2)).unwrap();

        assert!(store.remove_tab_everywhere(1).is_empty());
        assert!(store.contains(group.id));

        let closed = store.remove_tab_everywhere(2);
        assert_eq!(closed.len(), 1);
        assert!(!store.contains(group.id));
    }

    #[test]
    fn test_pruned_does_not_mutate() {
        let mut store = GroupStore::new();
        let group = store.create_group("Work", "#3b82f6", false).unwrap();
        store.append_member(group.id, member(1)).unwrap();
        store.append_member(group.id, member(2)).unwrap();

        let live: HashSet<TabId> = [2].into_iter().collect();
        let pruned = store.pruned(&live);

        assert_eq!(pruned[0].tabs.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(store.get(group.id).unwrap().tab_count(), 2);
    }

    #[test]
    fn test_check_invariants_detects_shared_tab() {
        let mut store = GroupStore::new();
        let a = store.create_group("A", "#000", false).unwrap();
        let b = store.create_group("B", "#000", false).unwrap();
        store.append_member(a.id, member(1)).unwrap();
        assert!(store.check_invariants().is_ok());

        store.append_member(b.id, member(1)).unwrap();
        assert!(matches!(
            store.check_invariants(),
            Err(GroupError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_rebind_members() {
        let mut store = GroupStore::new();
        let keep = store.create_group("Keep", "#000", false).unwrap();
        let gone = store.create_group("Gone", "#000", true).unwrap();
        store.append_member(keep.id, member(1)).unwrap();
        store.append_member(keep.id, member(2)).unwrap();
        store.append_member(gone.id, member(3)).unwrap();

        let (dropped, closed) = store.rebind_members(|m| (m.id != 3).then_some(m.id + 100));

        assert_eq!(dropped.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(closed.len(), 1);
        let ids: Vec<TabId> = store.get(keep.id).unwrap().tabs.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![101, 102]);
    }

    #[test]
    fn test_replace_all_keeps_ids_increasing() {
        let mut store = GroupStore::new();
        let first = store.create_group("A", "#000", false).unwrap();

        store.replace_all(Vec::new());
        let second = store.create_group("B", "#000", false).unwrap();
        assert!(second.id > first.id);
    }
}
