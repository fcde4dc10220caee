//! # Domain Types
//!
//! Core domain types used throughout the vending machine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Coin       │   │   MachineMode   │   │     ItemId      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  5p  10p  20p   │   │  Vending        │   │  u32, assigned  │       │
//! │  │  50p  £1   £2   │   │  Service        │   │  sequentially   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VendError;
use crate::money::Money;

// =============================================================================
// Item Id
// =============================================================================

/// Identity of a catalog entry.
///
/// Ids are positive, assigned in creation order by the machine's
/// [`ItemIdSequence`](crate::item::ItemIdSequence) and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(id: u32) -> Self {
        ItemId(id)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Machine Mode
// =============================================================================

/// The operating mode of the machine.
///
/// Customers can only buy in `Vending` mode. Restocking, adding items and
/// resetting require `Service` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MachineMode {
    /// Accepting coins and selling items.
    #[default]
    Vending,
    /// Out of customer use; open for maintenance.
    Service,
}

impl MachineMode {
    /// Display label, also used in the machine record file.
    pub const fn label(&self) -> &'static str {
        match self {
            MachineMode::Vending => "Vending Mode",
            MachineMode::Service => "Service Mode",
        }
    }

    /// Parses a display label back into a mode.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Vending Mode" => Some(MachineMode::Vending),
            "Service Mode" => Some(MachineMode::Service),
            _ => None,
        }
    }

    /// Returns the other mode.
    pub const fn toggled(&self) -> Self {
        match self {
            MachineMode::Vending => MachineMode::Service,
            MachineMode::Service => MachineMode::Vending,
        }
    }
}

impl fmt::Display for MachineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Coin
// =============================================================================

/// The six coins the machine accepts and pays out.
///
/// Variants are declared smallest first; that is also the order of the coin
/// record in the machine file and of the front end's coin menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coin {
    FivePence,
    TenPence,
    TwentyPence,
    FiftyPence,
    OnePound,
    TwoPounds,
}

impl Coin {
    /// All coins, smallest first.
    pub const ALL: [Coin; 6] = [
        Coin::FivePence,
        Coin::TenPence,
        Coin::TwentyPence,
        Coin::FiftyPence,
        Coin::OnePound,
        Coin::TwoPounds,
    ];

    /// All coins, largest first. Change is picked and listed in this order.
    pub const LARGEST_FIRST: [Coin; 6] = [
        Coin::TwoPounds,
        Coin::OnePound,
        Coin::FiftyPence,
        Coin::TwentyPence,
        Coin::TenPence,
        Coin::FivePence,
    ];

    /// Face value in pence.
    pub const fn pence(&self) -> i64 {
        match self {
            Coin::FivePence => 5,
            Coin::TenPence => 10,
            Coin::TwentyPence => 20,
            Coin::FiftyPence => 50,
            Coin::OnePound => 100,
            Coin::TwoPounds => 200,
        }
    }

    /// Face value as Money.
    pub const fn value(&self) -> Money {
        Money::from_pence(self.pence())
    }

    /// Short label as printed on the coin menu.
    pub const fn label(&self) -> &'static str {
        match self {
            Coin::FivePence => "5p",
            Coin::TenPence => "10p",
            Coin::TwentyPence => "20p",
            Coin::FiftyPence => "50p",
            Coin::OnePound => "£1",
            Coin::TwoPounds => "£2",
        }
    }

    /// Position in [`Coin::ALL`]; used to index per-coin counters.
    pub(crate) const fn slot(&self) -> usize {
        match self {
            Coin::FivePence => 0,
            Coin::TenPence => 1,
            Coin::TwentyPence => 2,
            Coin::FiftyPence => 3,
            Coin::OnePound => 4,
            Coin::TwoPounds => 5,
        }
    }

    /// Maps the front end's 1-based coin menu option (1 = 5p … 6 = £2).
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::Coin;
    ///
    /// assert_eq!(Coin::from_option(4), Ok(Coin::FiftyPence));
    /// assert!(Coin::from_option(7).is_err());
    /// ```
    pub fn from_option(option: i64) -> Result<Coin, VendError> {
        usize::try_from(option)
            .ok()
            .and_then(|o| o.checked_sub(1))
            .and_then(|slot| Coin::ALL.get(slot).copied())
            .ok_or(VendError::InvalidCoin(option))
    }
}

/// Converts a face value in pence into a coin.
impl TryFrom<i64> for Coin {
    type Error = VendError;

    fn try_from(pence: i64) -> Result<Self, Self::Error> {
        Coin::ALL
            .into_iter()
            .find(|coin| coin.pence() == pence)
            .ok_or(VendError::InvalidCoin(pence))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default() {
        assert_eq!(MachineMode::default(), MachineMode::Vending);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(MachineMode::Vending.label(), "Vending Mode");
        assert_eq!(
            MachineMode::from_label(" Service Mode "),
            Some(MachineMode::Service)
        );
        assert_eq!(MachineMode::from_label("service mode"), None);
        assert_eq!(MachineMode::Vending.toggled(), MachineMode::Service);
    }

    #[test]
    fn test_coin_from_option() {
        assert_eq!(Coin::from_option(1), Ok(Coin::FivePence));
        assert_eq!(Coin::from_option(6), Ok(Coin::TwoPounds));
        assert_eq!(Coin::from_option(0), Err(VendError::InvalidCoin(0)));
        assert_eq!(Coin::from_option(-1), Err(VendError::InvalidCoin(-1)));
        assert_eq!(Coin::from_option(7), Err(VendError::InvalidCoin(7)));
    }

    #[test]
    fn test_coin_from_pence() {
        assert_eq!(Coin::try_from(50), Ok(Coin::FiftyPence));
        assert_eq!(Coin::try_from(100), Ok(Coin::OnePound));
        assert_eq!(Coin::try_from(25), Err(VendError::InvalidCoin(25)));
    }

    #[test]
    fn test_coin_orders_agree() {
        let mut reversed = Coin::ALL;
        reversed.reverse();
        assert_eq!(reversed, Coin::LARGEST_FIRST);
        for (slot, coin) in Coin::ALL.iter().enumerate() {
            assert_eq!(coin.slot(), slot);
        }
    }
}
