//! # Store Configuration
//!
//! Where the machine record file lives.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::from_env()                                                │
//! │       │                                                                 │
//! │       ├── VEND_DATA_PATH set? ──────────► that path                     │
//! │       │                                                                 │
//! │       └── StoreConfig::default()                                        │
//! │             ├── platform data dir ──────► <data_dir>/machineData.csv    │
//! │             └── no home directory ──────► ./machineData.csv             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Platform-Specific Paths
//! - **macOS**: `~/Library/Application Support/com.vend.machine/machineData.csv`
//! - **Windows**: `%APPDATA%\vend\machine\data\machineData.csv`
//! - **Linux**: `~/.local/share/machine/machineData.csv`

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the record file location.
pub const DATA_PATH_ENV: &str = "VEND_DATA_PATH";

/// File name of the machine record.
pub const DATA_FILE_NAME: &str = "machineData.csv";

/// Record file settings.
///
/// ## Example
/// ```rust
/// use vend_store::StoreConfig;
///
/// let config = StoreConfig::new("./data/machineData.csv");
/// assert!(config.data_path.ends_with("machineData.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the record file. Parent directories are created on save.
    pub data_path: PathBuf,
}

impl StoreConfig {
    /// Creates a configuration for an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_path: path.into(),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// Environment variables:
    /// - `VEND_DATA_PATH`: record file path (default: platform data dir)
    pub fn from_env() -> Self {
        match std::env::var(DATA_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => StoreConfig::new(path),
            _ => StoreConfig::default(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_path = ProjectDirs::from("com", "vend", "machine")
            .map(|dirs| dirs.data_dir().join(DATA_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME));

        StoreConfig { data_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_given_path() {
        let config = StoreConfig::new("/tmp/vend/machine.csv");
        assert_eq!(config.data_path(), Path::new("/tmp/vend/machine.csv"));
    }

    #[test]
    fn test_default_file_name() {
        let config = StoreConfig::default();
        assert_eq!(
            config.data_path().file_name().and_then(|name| name.to_str()),
            Some(DATA_FILE_NAME)
        );
    }
}
