//! Tab data structure
//!
//! A tab as the browser reports it. Records are ephemeral: they live as long
//! as the underlying browser tab and are re-queried after every mutation.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TabError;
use crate::Result;

/// Opaque browser handle, unique per live tab
pub type TabId = i64;

/// Inline grey square used when no favicon can be derived
pub const PLACEHOLDER_FAVICON: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTYiIGhlaWdodD0iMTYiIHZpZXdCb3g9IjAgMCAxNiAxNiIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KPHJlY3Qgd2lkdGg9IjE2IiBoZWlnaHQ9IjE2IiBmaWxsPSIjRjNGNEY2Ii8+CjxwYXRoIGQ9Ik04IDRWMTJNNCAxMkwxMiAxMiIgc3Ryb2tlPSIjOUNBM0FGIiBzdHJva2Utd2lkdGg9IjEuNSIgc3Ryb2tlLWxpbmVjYXA9InJvdW5kIi8+Cjwvc3ZnPgo=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Browser handle
    pub id: TabId,
    /// Page title
    pub title: String,
    /// Current URL
    pub url: String,
    /// Host of `url` without a leading `www.`
    pub domain: String,
    /// Favicon URL (browser-provided or derived from the host)
    pub favicon: String,
    /// Whether this is the focused tab of the window
    #[serde(default)]
    pub active: bool,
}

impl Tab {
    /// Build a tab record from what the browser reports. A missing favicon is
    /// derived from the URL's host.
    pub fn new(
        id: TabId,
        title: impl Into<String>,
        url: impl Into<String>,
        favicon: Option<String>,
    ) -> Self {
        let url = url.into();
        let domain = derive_domain(&url);
        let favicon = favicon
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| favicon_for(&url));

        Self {
            id,
            title: title.into(),
            url,
            domain,
            favicon,
            active: false,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Lightweight copy kept in saved sessions
    pub fn to_record(&self) -> TabRecord {
        TabRecord {
            title: self.title.clone(),
            url: self.url.clone(),
            favicon: self.favicon.clone(),
        }
    }
}

/// A tab detached from its live handle: what a session remembers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub title: String,
    pub url: String,
    pub favicon: String,
}

impl TabRecord {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Host of `url` with a leading `www.` removed; `unknown` if it does not parse.
pub fn derive_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => "unknown".to_string(),
    }
}

/// Favicon service URL for the host of `url`, or the inline placeholder.
pub fn favicon_for(url: &str) -> String {
    match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_owned)) {
        Some(host) => format!("https://www.google.com/s2/favicons?domain={host}&sz=16"),
        None => PLACEHOLDER_FAVICON.to_string(),
    }
}
