//! # vend-core: Pure Business Logic for the Vending Machine
//!
//! This crate is the **transaction engine** of the vending machine. It
//! contains all business logic as plain data and pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Machine Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front End (menu / prompt loop)                  │   │
//! │  │    List Items ──► Insert Coins ──► Purchase ──► Service Menu    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ parsed integers / strings              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   till    │  │  machine  │  │ validation│  │   │
//! │  │   │   Coin    │  │ CoinTill  │  │  Vending  │  │ normalize │  │   │
//! │  │   │   Mode    │  │ Breakdown │  │  Machine  │  │  + checks │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO LOGGING • PURE STATE TRANSITIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vend-store (Persistence Layer)                  │   │
//! │  │              record codec, machine file load/save               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Coin, MachineMode, ItemId)
//! - [`money`] - Money type with integer pence arithmetic (no floating point!)
//! - [`till`] - The coin till and greedy change-making
//! - [`item`] - Catalog entries and the item id sequence
//! - [`machine`] - The vending machine engine and purchase outcomes
//! - [`defaults`] - Factory-fresh machine seeding
//! - [`error`] - Domain error types
//! - [`validation`] - Input normalization and strict admin validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::defaults::default_machine;
//! use vend_core::{Coin, PurchaseOutcome};
//!
//! let mut machine = default_machine();
//! machine.insert_coin(Coin::OnePound).unwrap();
//! machine.insert_coin(Coin::FiftyPence).unwrap();
//!
//! // Skittles cost 80p: 70p change comes back as 50p + 20p
//! let outcome = machine.purchase(1).unwrap();
//! match outcome {
//!     PurchaseOutcome::Delivered(receipt) => {
//!         assert_eq!(receipt.change.pence(), 70);
//!         assert_eq!(receipt.coins.count(Coin::FiftyPence), 1);
//!         assert_eq!(receipt.coins.count(Coin::TwentyPence), 1);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! assert!(machine.session_balance().is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod defaults;
pub mod error;
pub mod item;
pub mod machine;
pub mod money;
pub mod till;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ErrorCategory, ValidationError, VendError, VendResult};
pub use item::{Delivery, ItemIdSequence, VendItem};
pub use machine::{ItemSummary, PurchaseOutcome, Receipt, SystemInfo, VendingMachine};
pub use money::Money;
pub use till::{CoinBreakdown, CoinTill};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item held in its spiral.
pub const MAX_ITEM_QUANTITY: i64 = 10;

/// Highest unit price an item may carry, in pence (£2.00).
///
/// Out-of-range prices normalize to this value.
pub const MAX_UNIT_PRICE_PENCE: i64 = 200;

/// Prices must be a whole multiple of the smallest coin (5p).
pub const PRICE_STEP_PENCE: i64 = 5;

/// Catalog capacity used when a non-positive capacity is requested.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Placeholder for blank or unusable owner and item names.
pub const UNASSIGNED: &str = "Unassigned";

/// Owner of a factory-fresh machine.
pub const DEFAULT_OWNER: &str = "The Vending Company";
