//! # File-Backed Machine Store
//!
//! Loads the machine at start-up and saves it at shutdown.
//!
//! ```text
//! start ──► MachineStore::load() ──► run menus ──► MachineStore::save(&machine)
//!              │                                        │
//!              ├── no file      → defaults (INFO)       ├── creates parent dirs
//!              ├── unreadable   → defaults (WARN)       └── I/O error returned
//!              └── corrupt      → defaults (WARN)
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};
use vend_core::defaults::default_machine;
use vend_core::VendingMachine;

use crate::codec::{encode, restore};
use crate::config::StoreConfig;
use crate::error::StoreResult;

/// Reads and writes the machine record file.
#[derive(Debug, Clone)]
pub struct MachineStore {
    config: StoreConfig,
}

impl MachineStore {
    pub fn new(config: StoreConfig) -> Self {
        MachineStore { config }
    }

    /// Store at the location given by the environment.
    pub fn from_env() -> Self {
        MachineStore::new(StoreConfig::from_env())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        self.config.data_path()
    }

    /// Checks whether a record file is present.
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Loads the machine, falling back to the factory-fresh machine.
    ///
    /// Never fails: a missing, unreadable or corrupt file all yield the
    /// default machine.
    pub fn load(&self) -> VendingMachine {
        let path = self.path();

        let text = match fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read machine record");
                return default_machine();
            }
        };

        let machine = restore(text.as_deref());
        info!(
            path = %path.display(),
            items = machine.item_count(),
            mode = %machine.mode(),
            "Machine loaded"
        );
        machine
    }

    /// Writes the machine record, replacing any previous file.
    pub fn save(&self, machine: &VendingMachine) -> StoreResult<()> {
        let path = self.path();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, encode(machine))?;

        info!(
            path = %path.display(),
            items = machine.item_count(),
            total = %machine.total_money(),
            "Machine saved"
        );
        Ok(())
    }
}
