//! Core error types

use thiserror::Error;

use tabstack_groups::GroupError;
use tabstack_session::SessionError;
use tabstack_tabs::TabError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] tabstack_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] TabError),

    #[error("Group error: {0}")]
    Group(#[from] GroupError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// How a failure should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; nothing was mutated
    Validation,
    /// The referenced group, session or tab no longer exists
    NotFound,
    /// The browser or the persistence layer failed; earlier mutations stand
    Collaborator,
    /// A group invariant was broken. Never expected outside a bug.
    Internal,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Group(GroupError::EmptyName | GroupError::DuplicateName(_)) => {
                ErrorKind::Validation
            }
            CoreError::Group(GroupError::NotFound(_) | GroupError::TabNotFound(_)) => {
                ErrorKind::NotFound
            }
            CoreError::Group(GroupError::InvariantViolation(_)) => ErrorKind::Internal,
            CoreError::Session(SessionError::NotFound(_)) => ErrorKind::NotFound,
            CoreError::Session(SessionError::InvalidLimit) | CoreError::Config(_) => {
                ErrorKind::Validation
            }
            CoreError::Tab(TabError::NotFound(_)) => ErrorKind::NotFound,
            CoreError::Tab(TabError::InvalidUrl(_)) => ErrorKind::Validation,
            CoreError::Tab(TabError::Provider { .. })
            | CoreError::Storage(_)
            | CoreError::Serialization(_)
            | CoreError::Io(_) => ErrorKind::Collaborator,
        }
    }
}
