//! Tab Snapshot Provider
//!
//! The browser side of the system. Every call may suspend; callers must
//! re-read whatever state they depend on once the call returns.

use async_trait::async_trait;

use crate::tab::{Tab, TabId};
use crate::Result;

#[async_trait]
pub trait TabProvider: Send + Sync {
    /// Current tabs of the window, in strip order
    async fn query_open_tabs(&self) -> Result<Vec<Tab>>;

    async fn activate_tab(&self, id: TabId) -> Result<()>;

    async fn remove_tabs(&self, ids: &[TabId]) -> Result<()>;

    /// Open `url` and return the freshly created tab with its new handle
    async fn create_tab(&self, url: &str, active: bool) -> Result<Tab>;

    async fn reorder_tab(&self, id: TabId, index: usize) -> Result<()>;
}
