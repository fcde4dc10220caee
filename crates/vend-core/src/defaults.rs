//! # Factory Defaults
//!
//! The machine a first run starts with, and the machine a corrupt record
//! file falls back to.
//!
//! ```text
//! Owner: The Vending Company      Capacity: 10 items
//!
//!   Item           Price   Qty         Coin   Count
//!   Haribo         £1.00   10          5p     10
//!   Skittles       £0.80    4          10p    10
//!   Snickers       £0.80    0          20p    10
//!   Coke           £1.20    1          50p    10
//!   Diet Coke      £1.20    5          £1      5
//!   Toffee Crisp   £0.90    2          £2      0
//!                                      total  £13.50
//! ```

use crate::machine::VendingMachine;
use crate::money::Money;
use crate::till::CoinTill;
use crate::types::MachineMode;
use crate::{DEFAULT_MAX_ITEMS, DEFAULT_OWNER};

/// Starter stock as `(name, price in pence, quantity)`.
pub const STARTER_ITEMS: [(&str, i64, i64); 6] = [
    ("Haribo", 100, 10),
    ("Skittles", 80, 4),
    ("Snickers", 80, 0),
    ("Coke", 120, 1),
    ("Diet Coke", 120, 5),
    ("Toffee Crisp", 90, 2),
];

/// Starter coin counts, smallest coin first.
pub const STARTER_COINS: [u32; 6] = [10, 10, 10, 10, 5, 0];

/// The till a new machine is delivered with (£13.50).
pub fn starter_till() -> CoinTill {
    CoinTill::from_counts(STARTER_COINS)
}

/// Builds the factory-fresh machine in vending mode.
pub fn default_machine() -> VendingMachine {
    let mut machine = VendingMachine::from_parts(
        DEFAULT_OWNER,
        DEFAULT_MAX_ITEMS as i64,
        MachineMode::Vending,
        starter_till(),
    );

    for (name, price, quantity) in STARTER_ITEMS {
        let item = machine.create_item(name, Money::from_pence(price), quantity);
        let added = machine.add_item(item);
        debug_assert!(added.is_ok(), "starter item rejected: {added:?}");
    }

    machine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coin;

    #[test]
    fn test_default_machine() {
        let machine = default_machine();
        assert_eq!(machine.owner(), "The Vending Company");
        assert_eq!(machine.max_items(), 10);
        assert_eq!(machine.mode(), MachineMode::Vending);
        assert_eq!(machine.item_count(), 6);
        assert_eq!(machine.total_quantity(), 22);
        assert_eq!(machine.total_money(), Money::from_pence(1350));
        assert!(machine.session_balance().is_zero());
        assert_eq!(machine.till().count(Coin::OnePound), 5);
    }

    #[test]
    fn test_every_starter_item_is_stocked() {
        let machine = default_machine();
        assert_eq!(machine.item_count(), STARTER_ITEMS.len());
        for (item, (name, price, quantity)) in machine.items().iter().zip(STARTER_ITEMS) {
            assert_eq!(item.name(), name);
            assert_eq!(item.unit_price(), Money::from_pence(price));
            assert_eq!(item.quantity(), quantity);
        }
    }

    #[test]
    fn test_default_item_ids_are_sequential() {
        let machine = default_machine();
        let ids: Vec<u32> = machine.items().iter().map(|item| item.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(machine.next_item_id().get(), 7);
    }

    #[test]
    fn test_default_machines_are_equal() {
        assert_eq!(default_machine(), default_machine());
    }

    #[test]
    fn test_starter_till_is_not_low() {
        assert!(!starter_till().low_coin_warning());
    }
}
