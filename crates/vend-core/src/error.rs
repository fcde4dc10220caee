//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── VendError        - Every engine failure                           │
//! │  └── ValidationError  - Strict admin input failures                    │
//! │                                                                         │
//! │  vend-store errors (separate crate)                                    │
//! │  └── StoreError       - Corrupt records, file I/O                      │
//! │                                                                         │
//! │  Flow: ValidationError → VendError → front end message                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (price, balance, item name)
//! 3. Errors are enum variants, never String
//! 4. A failed operation never leaves partial state behind

use thiserror::Error;

use crate::money::Money;
use crate::types::{Coin, ItemId};

// =============================================================================
// Error Category
// =============================================================================

/// Coarse classification of engine failures.
///
/// Front ends use this to decide how to present a failure without matching
/// on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed coin, selection, quantity or field value.
    InvalidInput,
    /// Operation not allowed in the machine's current state.
    PreconditionViolation,
    /// The customer has not inserted enough money.
    InsufficientFunds,
    /// The till cannot cover a payout or hold another coin.
    ResourceExhaustion,
}

// =============================================================================
// Vend Error
// =============================================================================

/// Vending machine engine errors.
///
/// Every variant describes a rejected operation: the machine state is
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VendError {
    /// Coin value or menu option is not one of the six recognized coins.
    #[error("Invalid coin: {0}")]
    InvalidCoin(i64),

    /// Item position is outside the catalog.
    ///
    /// `index` is signed: front ends subtract one from the menu option, so
    /// an option of 0 arrives here as -1.
    #[error("Invalid selection: {index} (machine holds {item_count} items)")]
    InvalidSelection { index: i64, item_count: usize },

    /// Customer operation attempted while the machine is being serviced.
    #[error("Machine is in service mode")]
    ServiceModeActive,

    /// Administrative operation attempted while the machine is vending.
    #[error("Enable service mode to {action}")]
    ServiceModeRequired { action: &'static str },

    /// There are no items in the machine.
    #[error("The vending machine does not contain any items")]
    EmptyMachine,

    /// The session balance does not cover the item price.
    ///
    /// ## User Workflow
    /// ```text
    /// Insert 50p ──► Select Coke (£1.20)
    ///      │
    ///      ▼
    /// InsufficientFunds { price: £1.20, balance: £0.50 }
    ///      │
    ///      ▼
    /// Balance is kept: customer may insert more coins and retry
    /// ```
    #[error("Insufficient funds: item costs {price}, you entered {balance}")]
    InsufficientFunds { price: Money, balance: Money },

    /// The selected item has no stock left.
    #[error("Item \"{name}\" is out of stock")]
    OutOfStock { name: String },

    /// Restock quantity must be positive.
    #[error("\"{0}\" is not a valid quantity")]
    InvalidQuantity(i64),

    /// Restocking would take the item over its maximum quantity.
    #[error(
        "The maximum quantity for \"{name}\" is {max}: there are currently {current} in stock, \
         the maximum that can be added is {max_addable}"
    )]
    RestockExceedsCapacity {
        name: String,
        current: i64,
        max: i64,
        max_addable: i64,
    },

    /// Catalog already holds `max` items.
    #[error("There is no room in the vending machine for more items (max {max})")]
    CatalogFull { max: usize },

    /// An item with this id is already in the catalog.
    #[error("Item {0} is already in the machine")]
    DuplicateItem(ItemId),

    /// The till cannot express the payout with the coins it holds.
    #[error("Insufficient coins to pay out {amount}")]
    InsufficientChange { amount: Money },

    /// The till's counter for this coin is at its maximum.
    #[error("The {coin} coin store is full")]
    CoinStoreFull { coin: Coin },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl VendError {
    /// Returns the coarse category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            VendError::InvalidCoin(_)
            | VendError::InvalidSelection { .. }
            | VendError::InvalidQuantity(_)
            | VendError::Validation(_) => ErrorCategory::InvalidInput,

            VendError::ServiceModeActive
            | VendError::ServiceModeRequired { .. }
            | VendError::EmptyMachine
            | VendError::OutOfStock { .. }
            | VendError::RestockExceedsCapacity { .. }
            | VendError::CatalogFull { .. }
            | VendError::DuplicateItem(_) => ErrorCategory::PreconditionViolation,

            VendError::InsufficientFunds { .. } => ErrorCategory::InsufficientFunds,

            VendError::InsufficientChange { .. } | VendError::CoinStoreFull { .. } => {
                ErrorCategory::ResourceExhaustion
            }
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Only the strict admin path produces these; construction of catalog
/// entries normalizes bad input instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Numeric value is not a whole multiple of the step.
    #[error("{field} must be a multiple of {step}")]
    NotMultipleOf { field: String, step: i64 },

    /// Invalid format (e.g., separator characters in a name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with VendError.
pub type VendResult<T> = Result<T, VendError>;

// =============================================================================
// Unit Tests
// =============================================================================
