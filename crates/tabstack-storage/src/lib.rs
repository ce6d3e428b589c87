//! Tabstack Storage Layer
//!
//! SQLite-backed key-value store for the extension state.
//! Every `set` is a single transaction, so keys written together land together.

mod database;
mod error;
mod migrations;

pub use database::{Database, StateMap};
pub use error::StorageError;

/// Persisted key holding the group list
pub const GROUPS_KEY: &str = "groups";
/// Persisted key holding the session history
pub const SESSIONS_KEY: &str = "sessions";

pub type Result<T> = std::result::Result<T, StorageError>;
