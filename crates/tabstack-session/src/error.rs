//! Session error types

use thiserror::Error;

use crate::session::SessionId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session history must hold at least one entry")]
    InvalidLimit,
}
