//! Group error types

use tabstack_tabs::TabId;
use thiserror::Error;

use crate::group::GroupId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("Group name cannot be empty")]
    EmptyName,

    #[error("A group named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Group not found: {0}")]
    NotFound(GroupId),

    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Group invariant violated: {0}")]
    InvariantViolation(String),
}
