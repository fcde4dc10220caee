//! # Coin Till
//!
//! The machine's coin reserve and the change-making algorithm.
//!
//! ## Greedy Largest-First Change
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  withdraw(140p) with till { £2:1, £1:1, 50p:0, 20p:5, ... }            │
//! │                                                                         │
//! │  remaining 140 ── £2 too big ── take £1 ──► remaining 40               │
//! │  remaining  40 ── 50p none ──── take 20p ─► remaining 20               │
//! │  remaining  20 ──────────────── take 20p ─► remaining 0   ✅            │
//! │                                                                         │
//! │  Payout: { £1:1, 20p:2 }                                                │
//! │                                                                         │
//! │  If no coin fits while remaining > 0, the whole withdrawal fails and   │
//! │  the till is left exactly as it was.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no backtracking: a larger coin is always preferred even when a
//! different combination of smaller coins would have succeeded.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{VendError, VendResult};
use crate::money::Money;
use crate::types::Coin;

// =============================================================================
// Coin Breakdown
// =============================================================================

/// Per-coin counts of a payout (or of any group of coins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinBreakdown {
    counts: [u32; 6],
}

impl CoinBreakdown {
    /// An empty breakdown.
    pub const fn new() -> Self {
        CoinBreakdown { counts: [0; 6] }
    }

    /// Number of `coin` in this breakdown.
    #[inline]
    pub const fn count(&self, coin: Coin) -> u32 {
        self.counts[coin.slot()]
    }

    /// Adds one `coin`.
    pub fn push(&mut self, coin: Coin) {
        self.counts[coin.slot()] += 1;
    }

    /// Total number of coins.
    pub fn coin_count(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Total value of the coins.
    pub fn total(&self) -> Money {
        Coin::ALL
            .iter()
            .fold(Money::zero(), |acc, coin| acc + coin.value() * self.count(*coin))
    }

    /// Checks whether there are no coins at all.
    pub fn is_empty(&self) -> bool {
        self.coin_count() == 0
    }

    /// Non-zero entries, largest coin first.
    pub fn iter(&self) -> impl Iterator<Item = (Coin, u32)> + '_ {
        Coin::LARGEST_FIRST
            .into_iter()
            .map(|coin| (coin, self.count(coin)))
            .filter(|(_, count)| *count > 0)
    }
}

/// One line per coin type, largest first: `> 50p Coins: 1`.
impl fmt::Display for CoinBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (coin, count) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "> {} Coins: {}", coin.label(), count)?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Coin Till
// =============================================================================

/// Counts of every coin held by the machine.
///
/// ## Invariant
/// `total()` is the machine's total money. The machine never tracks a
/// separate total, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoinTill {
    counts: [u32; 6],
}

impl CoinTill {
    /// An empty till.
    pub const fn new() -> Self {
        CoinTill { counts: [0; 6] }
    }

    /// Builds a till from counts ordered smallest coin first.
    pub const fn from_counts(counts: [u32; 6]) -> Self {
        CoinTill { counts }
    }

    /// Counts ordered smallest coin first (the coin record order).
    pub const fn counts(&self) -> [u32; 6] {
        self.counts
    }

    /// Number of `coin` held.
    #[inline]
    pub const fn count(&self, coin: Coin) -> u32 {
        self.counts[coin.slot()]
    }

    /// Overwrites the count of `coin`. Negative counts clamp to zero.
    pub fn set_count(&mut self, coin: Coin, count: i64) {
        self.counts[coin.slot()] = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
    }

    /// Accepts one coin.
    ///
    /// Fails with [`VendError::CoinStoreFull`] when the counter for `coin`
    /// is already at its maximum; the till is left unchanged.
    pub fn deposit(&mut self, coin: Coin) -> VendResult<()> {
        let slot = &mut self.counts[coin.slot()];
        *slot = slot
            .checked_add(1)
            .ok_or(VendError::CoinStoreFull { coin })?;
        Ok(())
    }

    /// Accepts a coin given by face value.
    ///
    /// Unrecognized values are rejected with [`VendError::InvalidCoin`] and
    /// nothing is deposited.
    pub fn deposit_pence(&mut self, pence: i64) -> VendResult<Coin> {
        let coin = Coin::try_from(pence)?;
        self.deposit(coin)?;
        Ok(coin)
    }

    /// Pays out `amount` using the largest available coin at every step.
    ///
    /// ## Atomicity
    /// Coins are taken from a working copy of the counts; the till is only
    /// updated once the full amount has been covered. On failure the till is
    /// untouched.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{Coin, CoinTill, Money};
    ///
    /// let mut till = CoinTill::from_counts([0, 0, 5, 0, 1, 1]);
    /// let payout = till.withdraw(Money::from_pence(140)).unwrap();
    /// assert_eq!(payout.count(Coin::OnePound), 1);
    /// assert_eq!(payout.count(Coin::TwentyPence), 2);
    /// assert_eq!(till.count(Coin::TwoPounds), 1);
    /// ```
    pub fn withdraw(&mut self, amount: Money) -> VendResult<CoinBreakdown> {
        if amount.is_negative() {
            return Err(VendError::InsufficientChange { amount });
        }

        let mut working = self.counts;
        let mut payout = CoinBreakdown::new();
        let mut remaining = amount.pence();

        while remaining > 0 {
            let next = Coin::LARGEST_FIRST
                .into_iter()
                .find(|coin| coin.pence() <= remaining && working[coin.slot()] > 0);

            match next {
                Some(coin) => {
                    working[coin.slot()] -= 1;
                    payout.push(coin);
                    remaining -= coin.pence();
                }
                None => return Err(VendError::InsufficientChange { amount }),
            }
        }

        self.counts = working;
        Ok(payout)
    }

    /// Total value held.
    pub fn total(&self) -> Money {
        Coin::ALL
            .iter()
            .fold(Money::zero(), |acc, coin| acc + coin.value() * self.count(*coin))
    }

    /// Empties the till.
    pub fn clear(&mut self) {
        self.counts = [0; 6];
    }

    /// True when the till may be unable to make change.
    ///
    /// Front ends show "coins low, please enter exact amount" when this
    /// holds: fewer than one 5p, 10p, 50p or £1, or fewer than two 20p.
    pub fn low_coin_warning(&self) -> bool {
        self.count(Coin::FivePence) < 1
            || self.count(Coin::TenPence) < 1
            || self.count(Coin::TwentyPence) < 2
            || self.count(Coin::FiftyPence) < 1
            || self.count(Coin::OnePound) < 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
