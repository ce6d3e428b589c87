//! Tabstack Session Management
//!
//! - A session is a named snapshot of the open tabs and the group list
//! - History is bounded; the oldest entry is evicted first
//! - Restoring opens fresh tabs and re-binds group membership to them by URL

mod error;
mod reconcile;
mod session;
mod store;

pub use error::SessionError;
pub use reconcile::{reconcile_members, Reconciliation};
pub use session::{Session, SessionId};
pub use store::{RestorePlan, SessionStore, DEFAULT_MAX_SESSIONS};

pub type Result<T> = std::result::Result<T, SessionError>;
