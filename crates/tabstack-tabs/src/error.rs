//! Tab error types

use thiserror::Error;

use crate::tab::TabId;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(TabId),

    #[error("Tab provider failed to {operation}: {message}")]
    Provider {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TabError {
    pub fn provider(operation: &'static str, message: impl Into<String>) -> Self {
        TabError::Provider {
            operation,
            message: message.into(),
        }
    }
}
