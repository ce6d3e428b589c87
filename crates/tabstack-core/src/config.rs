//! Organizer configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tabstack_session::DEFAULT_MAX_SESSIONS;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// How many saved sessions to keep
    pub max_sessions: usize,
    /// Color given to a group created without one
    pub default_group_color: String,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("tabstack.db"),
            max_sessions: DEFAULT_MAX_SESSIONS,
            default_group_color: "#3b82f6".to_string(),
            log_filter: "info".to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Tabstack"))
            .unwrap_or_else(|| PathBuf::from(".tabstack"))
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_sessions == 0 {
            return Err(CoreError::Config(
                "max_sessions must be at least 1".to_string(),
            ));
        }
        if self.default_group_color.trim().is_empty() {
            return Err(CoreError::Config(
                "default_group_color cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
