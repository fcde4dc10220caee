//! # Catalog Entries
//!
//! A `VendItem` is one product spiral in the machine: name, price and the
//! number of units left.
//!
//! ## Lifecycle
//! ```text
//! create (seed / admin / restore) ──► restock(+n) ──► sell(-1) ──► ...
//!        normalizes bad input          0 < n,             quantity > 0
//!                                      result <= 10
//! ```
//!
//! Entries are never deleted individually; `reset` drops the whole catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{VendError, VendResult};
use crate::money::Money;
use crate::types::ItemId;
use crate::validation::{normalize_name, normalize_price, normalize_quantity};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Item Id Sequence
// =============================================================================

/// Hands out item ids in creation order, starting at 1.
///
/// Owned by the machine; ids are never handed out twice by one sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIdSequence {
    next: u32,
}

impl ItemIdSequence {
    pub const fn new() -> Self {
        ItemIdSequence { next: 1 }
    }

    /// Returns the next id and advances the sequence.
    pub fn next_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub const fn peek(&self) -> ItemId {
        ItemId::new(self.next)
    }
}

impl Default for ItemIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// Confirmation that one unit left the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub item_id: ItemId,
    pub name: String,
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thanks for purchasing: {}", self.name)
    }
}

// =============================================================================
// Vend Item
// =============================================================================

/// A product held in the machine.
///
/// ## Invariants
/// - `name` is non-blank and contains no separators
/// - `unit_price` is a positive multiple of 5p, at most £2.00
/// - `quantity` is within `0..=10`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendItem {
    id: ItemId,
    name: String,
    unit_price: Money,
    quantity: i64,
}

impl VendItem {
    /// Creates an item, taking its id from `ids`.
    ///
    /// Bad input is normalized, never rejected: see
    /// [`validation`](crate::validation).
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{ItemIdSequence, Money, VendItem};
    ///
    /// let mut ids = ItemIdSequence::new();
    /// let item = VendItem::new(&mut ids, "", Money::from_pence(3), 42);
    /// assert_eq!(item.name(), "Unassigned");
    /// assert_eq!(item.unit_price().pence(), 200);
    /// assert_eq!(item.quantity(), 0);
    /// ```
    pub fn new(ids: &mut ItemIdSequence, name: &str, unit_price: Money, quantity: i64) -> Self {
        VendItem {
            id: ids.next_id(),
            name: normalize_name(name),
            unit_price: normalize_price(unit_price),
            quantity: normalize_quantity(quantity),
        }
    }

    #[inline]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Checks whether at least one unit is left.
    #[inline]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Adds `amount` units.
    ///
    /// ## Rules
    /// - `amount` must be positive
    /// - The result may not exceed 10
    ///
    /// On failure the quantity is unchanged.
    pub fn restock(&mut self, amount: i64) -> VendResult<i64> {
        if amount <= 0 {
            return Err(VendError::InvalidQuantity(amount));
        }

        let max_addable = MAX_ITEM_QUANTITY - self.quantity;
        if amount > max_addable {
            return Err(VendError::RestockExceedsCapacity {
                name: self.name.clone(),
                current: self.quantity,
                max: MAX_ITEM_QUANTITY,
                max_addable,
            });
        }

        self.quantity += amount;
        Ok(self.quantity)
    }

    /// Hands out one unit.
    pub fn sell(&mut self) -> VendResult<Delivery> {
        if !self.in_stock() {
            return Err(VendError::OutOfStock {
                name: self.name.clone(),
            });
        }

        self.quantity -= 1;
        Ok(Delivery {
            item_id: self.id,
            name: self.name.clone(),
        })
    }
}

impl fmt::Display for VendItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n   Price: {}\n   Quantity: {}",
            self.name, self.unit_price, self.quantity
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
