//! Session Store
//!
//! Append-only history of saved sessions, bounded to the most recent entries.

use chrono::Utc;
use tabstack_groups::Group;
use tabstack_tabs::Tab;

use crate::error::SessionError;
use crate::session::{Session, SessionId};
use crate::Result;

pub const DEFAULT_MAX_SESSIONS: usize = 10;

/// What a restore asks of the outside world: open these URLs, then install
/// these groups in place of the current ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestorePlan {
    pub session_id: SessionId,
    pub name: String,
    pub tabs_to_open: Vec<String>,
    pub groups_to_install: Vec<Group>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Oldest first
    sessions: Vec<Session>,
    max_sessions: usize,
    last_id: SessionId,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            last_id: 0,
        }
    }
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Result<Self> {
        if max_sessions == 0 {
            return Err(SessionError::InvalidLimit);
        }

        Ok(Self {
            max_sessions,
            ..Self::default()
        })
    }

    /// Adopt a persisted history, trimming it to the bound if needed
    pub fn from_sessions(sessions: Vec<Session>, max_sessions: usize) -> Result<Self> {
        let mut store = Self::new(max_sessions)?;
        store.last_id = sessions.iter().map(|s| s.id).max().unwrap_or_default();
        store.sessions = sessions;
        store.evict_overflow();
        Ok(store)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    pub fn get(&self, session_id: SessionId) -> Result<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id == session_id)
            .ok_or(SessionError::NotFound(session_id))
    }

    /// Snapshot the current tabs and groups. A blank name gets a timestamped
    /// default.
    pub fn save(&mut self, name: &str, tabs: &[Tab], groups: &[Group]) -> Session {
        let name = match name.trim() {
            "" => Session::default_name(),
            trimmed => trimmed.to_string(),
        };

        let session = Session::capture(self.next_id(), name, tabs, groups);
        self.sessions.push(session.clone());
        let evicted = self.evict_overflow();

        tracing::info!(
            session_id = session.id,
            session_name = %session.name,
            tab_count = session.tab_count,
            group_count = session.group_count,
            evicted,
            "Saved session"
        );

        session
    }

    /// Build the restore plan for a session. Nothing is opened or installed
    /// here.
    pub fn restore(&self, session_id: SessionId) -> Result<RestorePlan> {
        let session = self.get(session_id)?;

        Ok(RestorePlan {
            session_id: session.id,
            name: session.name.clone(),
            tabs_to_open: session.urls(),
            groups_to_install: session.groups.clone(),
        })
    }

    /// Remove one entry. Unknown ids are a no-op.
    pub fn delete(&mut self, session_id: SessionId) -> Option<Session> {
        let index = self.sessions.iter().position(|s| s.id == session_id)?;
        let session = self.sessions.remove(index);

        tracing::info!(session_id, session_name = %session.name, "Deleted session");

        Some(session)
    }

    fn evict_overflow(&mut self) -> usize {
        let overflow = self.sessions.len().saturating_sub(self.max_sessions);
        if overflow > 0 {
            self.sessions.drain(0..overflow);
        }
        overflow
    }

    fn next_id(&mut self) -> SessionId {
        let id = Utc::now().timestamp_millis().max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }
}
