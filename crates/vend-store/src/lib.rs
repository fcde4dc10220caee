//! # vend-store: Persistence Layer for the Vending Machine
//!
//! Saves the whole machine to a flat record file and brings it back on the
//! next start.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Machine Data Flow                        │
//! │                                                                         │
//! │  Front end start-up / shutdown                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   vend-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ MachineStore  │    │     codec     │    │ StoreConfig  │   │   │
//! │  │   │  (store.rs)   │───►│ encode/decode │    │ (config.rs)  │   │   │
//! │  │   │  load / save  │    │ restore       │    │ data path    │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     machineData.csv                             │   │
//! │  │   ~/.local/share/machine/machineData.csv (or VEND_DATA_PATH)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`codec`] - Record text encoding, decoding and default fallback
//! - [`config`] - Record file location
//! - [`store`] - File load and save
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vend_core::Coin;
//! use vend_store::{MachineStore, StoreConfig};
//!
//! let store = MachineStore::new(StoreConfig::from_env());
//! let mut machine = store.load();
//!
//! machine.insert_coin(Coin::OnePound)?;
//! let _ = machine.purchase(0);
//!
//! store.save(&machine)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod config;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use codec::{decode, encode, restore};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::MachineStore;
