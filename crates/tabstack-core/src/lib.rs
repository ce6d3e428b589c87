//! Tabstack Core
//!
//! Coordination layer for the tab organizer. All state lives in an explicit
//! [`TabOrganizer`] value; every command takes it by `&mut` and returns the
//! [`ViewState`] the presentation layer needs to re-render.

mod config;
mod error;
mod organizer;
mod persistence;
mod view;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{CoreError, ErrorKind};
pub use organizer::{CloseOutcome, TabOrganizer};
pub use persistence::{PersistedState, StateStore};
pub use view::{GroupView, SessionSummary, TabView, ViewState};

// Re-export core components
pub use tabstack_groups::{
    marker_position, DragSession, Group, GroupError, GroupId, GroupMember, GroupStore,
    InsertionMarker, ItemRect, MarkerPosition, MoveTarget, SelectionSet,
};
pub use tabstack_session::{RestorePlan, Session, SessionError, SessionId, SessionStore};
pub use tabstack_storage::{Database, StateMap, StorageError};
pub use tabstack_tabs::{filter_tabs, find_duplicates, Tab, TabError, TabId, TabProvider};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging. A second call keeps the subscriber already installed.
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
