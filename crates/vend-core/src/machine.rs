//! # Vending Machine Engine
//!
//! Owns the catalog, the till, the customer's session balance and the
//! operating mode, and runs every transaction against them.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase(index)            checks run in this order, first one wins    │
//! │                                                                         │
//! │  1. index outside catalog ──────────► InvalidSelection                  │
//! │  2. machine in service mode ────────► ServiceModeActive                 │
//! │  3. catalog empty ──────────────────► EmptyMachine                      │
//! │  4. price > balance ────────────────► InsufficientFunds                 │
//! │  5. quantity == 0 ──────────────────► OutOfStock                        │
//! │        (1-5 leave the machine untouched, balance included)              │
//! │                                                                         │
//! │  6. sell one unit                                                       │
//! │     ├── total stock now 0? ─────────► mode = Service                    │
//! │     ├── change = balance - price, balance = 0                           │
//! │     └── till.withdraw(change)                                           │
//! │           ├── Ok  ──────────────────► Delivered(receipt)                │
//! │           └── Err ──────────────────► ChangeUnavailable                 │
//! │                 item stays sold, the excess stays in the till           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mode Rules
//! - Customers buy only in `Vending` mode
//! - `restock`, `add_new_item` and `reset` require `Service` mode
//! - Selling the last unit in the machine switches to `Service` mode

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{VendError, VendResult};
use crate::item::{ItemIdSequence, VendItem};
use crate::money::Money;
use crate::till::{CoinBreakdown, CoinTill};
use crate::types::{Coin, ItemId, MachineMode};
use crate::validation::{
    normalize_capacity, normalize_name, validate_item_name, validate_price,
    validate_stock_quantity,
};

// =============================================================================
// Purchase Outcome
// =============================================================================

/// A completed sale with change paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub item_id: ItemId,
    pub name: String,
    pub cost: Money,
    pub change: Money,
    /// Coins paid out, listed largest first.
    pub coins: CoinBreakdown,
}

/// Result of a purchase that got as far as handing out the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    /// Item delivered and change paid in full.
    Delivered(Receipt),

    /// Item delivered, but the till could not make change.
    ///
    /// The sale is not reverted: the customer keeps the item and the
    /// `forfeited` excess stays in the till.
    ChangeUnavailable {
        item_id: ItemId,
        name: String,
        cost: Money,
        forfeited: Money,
    },
}

impl PurchaseOutcome {
    /// Name of the item handed out.
    pub fn item_name(&self) -> &str {
        match self {
            PurchaseOutcome::Delivered(receipt) => &receipt.name,
            PurchaseOutcome::ChangeUnavailable { name, .. } => name,
        }
    }

    /// Change actually returned to the customer.
    pub fn change_given(&self) -> Money {
        match self {
            PurchaseOutcome::Delivered(receipt) => receipt.change,
            PurchaseOutcome::ChangeUnavailable { .. } => Money::zero(),
        }
    }
}

impl fmt::Display for PurchaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseOutcome::Delivered(receipt) => {
                write!(
                    f,
                    "Thanks for purchasing: {}\nCost: {}\nChange: {}",
                    receipt.name, receipt.cost, receipt.change
                )?;
                if !receipt.coins.is_empty() {
                    write!(f, "\n{}", receipt.coins)?;
                }
                Ok(())
            }
            PurchaseOutcome::ChangeUnavailable { name, cost, .. } => write!(
                f,
                "Thanks for purchasing: {}\nCost: {}\nChange: Insufficient coins, no change given",
                name, cost
            ),
        }
    }
}

// =============================================================================
// Reports
// =============================================================================

/// One line of the customer-facing item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// 1-based menu position.
    pub position: usize,
    pub item_id: ItemId,
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

impl fmt::Display for ItemSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {}\n   Price: {}\n   Quantity: {}",
            self.position, self.name, self.price, self.quantity
        )
    }
}

/// Snapshot for the maintenance "System Info" screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub owner: String,
    pub mode: MachineMode,
    pub max_items: usize,
    pub item_count: usize,
    pub session_balance: Money,
    pub total_money: Money,
    /// Coins held, smallest first.
    pub coins: Vec<(Coin, u32)>,
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System Info")?;
        writeln!(f, "===========")?;
        writeln!(f, "Owner: {}", self.owner)?;
        writeln!(f, "Status: {}", self.mode)?;
        writeln!(f, "Max Items: {}", self.max_items)?;
        writeln!(f, "Item Count: {}", self.item_count)?;
        writeln!(f, "User Money: {}", self.session_balance)?;
        write!(f, "Total Money: {}", self.total_money)?;
        for (coin, count) in &self.coins {
            write!(f, "\n> {} Coins: {}", coin.label(), count)?;
        }
        Ok(())
    }
}

// =============================================================================
// Vending Machine
// =============================================================================

/// The vending machine engine.
///
/// ## Invariants
/// - `items.len() <= max_items`, ids unique
/// - total money is the till's total (there is no separate counter)
/// - `session_balance` is never negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendingMachine {
    owner: String,
    max_items: usize,
    items: Vec<VendItem>,
    till: CoinTill,
    session_balance: Money,
    mode: MachineMode,
    ids: ItemIdSequence,
}

impl VendingMachine {
    /// Creates an empty machine in vending mode with an empty till.
    ///
    /// A blank owner becomes "Unassigned"; a non-positive capacity becomes 10.
    pub fn new(owner: &str, max_items: i64) -> Self {
        VendingMachine {
            owner: normalize_name(owner),
            max_items: normalize_capacity(max_items),
            items: Vec::new(),
            till: CoinTill::new(),
            session_balance: Money::zero(),
            mode: MachineMode::Vending,
            ids: ItemIdSequence::new(),
        }
    }

    /// Creates an empty machine with the given mode and till contents.
    ///
    /// Used when restoring a machine from its record file.
    pub fn from_parts(owner: &str, max_items: i64, mode: MachineMode, till: CoinTill) -> Self {
        VendingMachine {
            mode,
            till,
            ..VendingMachine::new(owner, max_items)
        }
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    pub const fn mode(&self) -> MachineMode {
        self.mode
    }

    /// Money inserted by the current customer and not yet spent.
    pub const fn session_balance(&self) -> Money {
        self.session_balance
    }

    /// All money held by the machine.
    pub fn total_money(&self) -> Money {
        self.till.total()
    }

    pub const fn till(&self) -> &CoinTill {
        &self.till
    }

    /// Catalog entries in menu order.
    pub fn items(&self) -> &[VendItem] {
        &self.items
    }

    /// Catalog entry at a 0-based position.
    pub fn item(&self, index: usize) -> Option<&VendItem> {
        self.items.get(index)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Units left across the whole catalog.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(VendItem::quantity).sum()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_items
    }

    /// The id the next created item will receive.
    pub const fn next_item_id(&self) -> ItemId {
        self.ids.peek()
    }

    /// See [`CoinTill::low_coin_warning`].
    pub fn low_coin_warning(&self) -> bool {
        self.till.low_coin_warning()
    }

    // -------------------------------------------------------------------------
    // Customer operations
    // -------------------------------------------------------------------------

    /// Accepts a coin, returning the new session balance.
    ///
    /// The coin goes into the till straight away, so the machine's total
    /// grows by the same amount as the balance. A coin whose store is full
    /// is refused and nothing changes.
    pub fn insert_coin(&mut self, coin: Coin) -> VendResult<Money> {
        self.till.deposit(coin)?;
        self.session_balance += coin.value();
        Ok(self.session_balance)
    }

    /// Accepts a coin chosen from the front end's 1-based coin menu
    /// (1 = 5p … 6 = £2).
    ///
    /// An unknown option leaves the machine untouched.
    pub fn insert_coin_option(&mut self, option: i64) -> VendResult<Money> {
        let coin = Coin::from_option(option)?;
        self.insert_coin(coin)
    }

    /// Buys the item at 0-based position `index`.
    ///
    /// `Err` means the purchase was refused and nothing changed. `Ok` means
    /// the item was handed out and the balance is back to zero; check the
    /// outcome to see whether change was paid.
    pub fn purchase(&mut self, index: usize) -> VendResult<PurchaseOutcome> {
        self.check_index(index)?;

        if self.mode == MachineMode::Service {
            return Err(VendError::ServiceModeActive);
        }

        if self.items.is_empty() {
            return Err(VendError::EmptyMachine);
        }

        let price = self.items[index].unit_price();
        if price > self.session_balance {
            return Err(VendError::InsufficientFunds {
                price,
                balance: self.session_balance,
            });
        }

        let delivery = self.items[index].sell()?;

        if self.total_quantity() == 0 {
            self.mode = MachineMode::Service;
        }

        let change = self.session_balance - price;
        self.session_balance = Money::zero();

        let outcome = match self.till.withdraw(change) {
            Ok(coins) => PurchaseOutcome::Delivered(Receipt {
                item_id: delivery.item_id,
                name: delivery.name,
                cost: price,
                change,
                coins,
            }),
            Err(_) => PurchaseOutcome::ChangeUnavailable {
                item_id: delivery.item_id,
                name: delivery.name,
                cost: price,
                forfeited: change,
            },
        };

        Ok(outcome)
    }

    /// Buys the item shown at 1-based menu `option`.
    pub fn purchase_option(&mut self, option: i64) -> VendResult<PurchaseOutcome> {
        let index = self.index_from_option(option)?;
        self.purchase(index)
    }

    /// Customer-facing item list, 1-based positions.
    pub fn item_listing(&self) -> Vec<ItemSummary> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| ItemSummary {
                position: i + 1,
                item_id: item.id(),
                name: item.name().to_string(),
                price: item.unit_price(),
                quantity: item.quantity(),
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Administrative operations
    // -------------------------------------------------------------------------

    /// Sets the operating mode.
    pub fn set_mode(&mut self, mode: MachineMode) {
        self.mode = mode;
    }

    /// Switches between vending and service mode, returning the new mode.
    pub fn toggle_mode(&mut self) -> MachineMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Adds `amount` units to the item at 0-based `index`, returning the
    /// new quantity.
    pub fn restock(&mut self, index: usize, amount: i64) -> VendResult<i64> {
        self.require_service("restock items")?;
        self.check_index(index)?;
        self.items[index].restock(amount)
    }

    /// Builds an item with the next id from this machine's sequence.
    ///
    /// The item is not added; see [`add_item`](Self::add_item).
    pub fn create_item(&mut self, name: &str, unit_price: Money, quantity: i64) -> VendItem {
        VendItem::new(&mut self.ids, name, unit_price, quantity)
    }

    /// Appends an item to the catalog.
    ///
    /// The caller is responsible for the mode: seeding and restoring add
    /// items to a machine in vending mode.
    pub fn add_item(&mut self, item: VendItem) -> VendResult<ItemId> {
        if self.items.iter().any(|existing| existing.id() == item.id()) {
            return Err(VendError::DuplicateItem(item.id()));
        }

        if self.is_full() {
            return Err(VendError::CatalogFull {
                max: self.max_items,
            });
        }

        let id = item.id();
        self.items.push(item);
        Ok(id)
    }

    /// The maintenance "add a new item" operation.
    ///
    /// Unlike [`create_item`](Self::create_item) this rejects bad input
    /// rather than normalizing it.
    pub fn add_new_item(
        &mut self,
        name: &str,
        unit_price: Money,
        quantity: i64,
    ) -> VendResult<ItemId> {
        self.require_service("add items")?;
        validate_item_name(name)?;
        validate_price(unit_price)?;
        validate_stock_quantity(quantity)?;

        if self.is_full() {
            return Err(VendError::CatalogFull {
                max: self.max_items,
            });
        }

        let item = self.create_item(name, unit_price, quantity);
        self.add_item(item)
    }

    /// Empties the machine of items and money and returns it to vending mode.
    ///
    /// Only allowed in service mode. The item id sequence carries on, so
    /// ids handed out before the reset are never reused.
    pub fn reset(&mut self) -> VendResult<()> {
        self.require_service("reset the system")?;

        self.items.clear();
        self.till.clear();
        self.session_balance = Money::zero();
        self.mode = MachineMode::Vending;
        Ok(())
    }

    /// Snapshot for the maintenance screen.
    pub fn system_info(&self) -> SystemInfo {
        SystemInfo {
            owner: self.owner.clone(),
            mode: self.mode,
            max_items: self.max_items,
            item_count: self.items.len(),
            session_balance: self.session_balance,
            total_money: self.total_money(),
            coins: Coin::ALL
                .iter()
                .map(|coin| (*coin, self.till.count(*coin)))
                .collect(),
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn check_index(&self, index: usize) -> VendResult<()> {
        if index >= self.items.len() {
            return Err(VendError::InvalidSelection {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                item_count: self.items.len(),
            });
        }
        Ok(())
    }

    fn index_from_option(&self, option: i64) -> VendResult<usize> {
        option
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .ok_or(VendError::InvalidSelection {
                index: option.saturating_sub(1),
                item_count: self.items.len(),
            })
    }

    fn require_service(&self, action: &'static str) -> VendResult<()> {
        if self.mode != MachineMode::Service {
            return Err(VendError::ServiceModeRequired { action });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
