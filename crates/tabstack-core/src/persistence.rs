//! Persistence collaborator
//!
//! Two top-level keys, `groups` and `sessions`, both plain JSON. They are
//! always written together in one `set` so a crash cannot separate them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tabstack_groups::Group;
use tabstack_session::Session;
use tabstack_storage::{Database, StateMap, GROUPS_KEY, SESSIONS_KEY};

use crate::Result;

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, keys: &[&str]) -> tabstack_storage::Result<StateMap>;

    async fn set(&self, values: StateMap) -> tabstack_storage::Result<()>;
}

#[async_trait]
impl StateStore for Database {
    async fn get(&self, keys: &[&str]) -> tabstack_storage::Result<StateMap> {
        Database::get(self, keys)
    }

    async fn set(&self, values: StateMap) -> tabstack_storage::Result<()> {
        Database::set(self, &values)
    }
}

/// Logical layout of the persisted state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub groups: Vec<Group>,
    pub sessions: Vec<Session>,
}

impl PersistedState {
    pub const KEYS: [&'static str; 2] = [GROUPS_KEY, SESSIONS_KEY];

    /// Absent keys read as empty lists
    pub fn from_map(mut values: StateMap) -> Result<Self> {
        let groups = match values.remove(GROUPS_KEY) {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };
        let sessions = match values.remove(SESSIONS_KEY) {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };
        Ok(Self { groups, sessions })
    }

    pub fn to_map(&self) -> Result<StateMap> {
        let mut values = StateMap::with_capacity(2);
        values.insert(GROUPS_KEY.to_string(), serde_json::to_value(&self.groups)?);
        values.insert(SESSIONS_KEY.to_string(), serde_json::to_value(&self.sessions)?);
        Ok(values)
    }

    pub async fn load<S: StateStore + ?Sized>(store: &S) -> Result<Self> {
        let values = store.get(&Self::KEYS).await?;
        Self::from_map(values)
    }

    pub async fn save<S: StateStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.set(self.to_map()?).await?;
        Ok(())
    }
}
