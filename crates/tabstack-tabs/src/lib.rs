//! Tabstack Tabs
//!
//! Read-only view of the browser's live tabs. The core never creates or
//! destroys a [`Tab`] itself; it asks a [`TabProvider`] to.

mod duplicates;
mod error;
mod filter;
mod provider;
mod tab;

pub use duplicates::{find_duplicates, DuplicateReport};
pub use error::TabError;
pub use filter::{filter_tabs, matches_query};
pub use provider::TabProvider;
pub use tab::{derive_domain, favicon_for, Tab, TabId, TabRecord, PLACEHOLDER_FAVICON};

pub type Result<T> = std::result::Result<T, TabError>;
