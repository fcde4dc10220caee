//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point pounds:                                            │
//! │    1.50 - 0.80 = 0.7000000000000001  ❌ WRONG!                          │
//! │                                                                         │
//! │  A change-maker working on that value has to round before it can       │
//! │  even start picking coins.                                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    150 - 80 = 70 pence, exactly                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::money::Money;
//!
//! let price = Money::from_pence(120); // £1.20
//! let balance = Money::from_pence(150);
//! assert_eq!((balance - price).pence(), 30);
//!
//! // The record file stores major units
//! assert_eq!(price.to_major_string(), "1.20");
//! assert_eq!("1.2".parse::<Money>().unwrap(), price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in pence (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences are computed before they are checked
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let price = Money::from_pence(80); // 80p
    /// assert_eq!(price.pence(), 80);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Returns the value in pence.
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the whole pounds portion.
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checks whether the value is a whole multiple of `step` pence.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// assert!(Money::from_pence(85).is_multiple_of(5));
    /// assert!(!Money::from_pence(83).is_multiple_of(5));
    /// ```
    #[inline]
    pub const fn is_multiple_of(&self, step: i64) -> bool {
        step != 0 && self.0 % step == 0
    }

    /// Renders the value in major units with two decimals (`13.50`).
    ///
    /// This is the representation used by the machine record file.
    pub fn to_major_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.pounds().abs(), self.pence_part())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error returned when text is not an exact amount of pence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    /// Nothing to parse.
    #[error("amount is empty")]
    Empty,

    /// Characters other than digits, one dot and a leading minus.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Non-zero digits below a penny.
    #[error("'{0}' has more precision than a penny")]
    SubPenny(String),

    /// The amount does not fit in pence.
    #[error("'{0}' is too large")]
    Overflow(String),
}

/// Parses an amount in major units (`13.5`, `13.50`, `13`, `-0.05`).
///
/// Fraction digits past the second must be zero: `1.000` is accepted,
/// `0.805` is not.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(ParseMoneyError::NotANumber(text.to_string()));
        }

        let (kept, dropped) = fraction.split_at(fraction.len().min(2));
        if dropped.chars().any(|c| c != '0') {
            return Err(ParseMoneyError::SubPenny(text.to_string()));
        }

        let overflow = || ParseMoneyError::Overflow(text.to_string());
        let pounds: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let pence: i64 = match kept.len() {
            0 => 0,
            1 => kept.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => kept.parse().map_err(|_| overflow())?,
        };

        let total = pounds
            .checked_mul(100)
            .and_then(|p| p.checked_add(pence))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way the machine's screen does.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}£{}.{:02}", sign, self.pounds().abs(), self.pence_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a coin count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        Money(self.0 * i64::from(count))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let money = Money::from_pence(1350);
        assert_eq!(money.pence(), 1350);
        assert_eq!(money.pounds(), 13);
        assert_eq!(money.pence_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_pence(80).to_string(), "£0.80");
        assert_eq!(Money::from_pence(200).to_string(), "£2.00");
        assert_eq!(Money::from_pence(-5).to_string(), "-£0.05");
        assert_eq!(Money::zero().to_string(), "£0.00");
    }

    #[test]
    fn test_major_string() {
        assert_eq!(Money::from_pence(1350).to_major_string(), "13.50");
        assert_eq!(Money::from_pence(5).to_major_string(), "0.05");
        assert_eq!(Money::from_pence(-120).to_major_string(), "-1.20");
    }

    #[test]
    fn test_parse_accepts_exact_amounts() {
        assert_eq!("13.5".parse::<Money>(), Ok(Money::from_pence(1350)));
        assert_eq!("13.50".parse::<Money>(), Ok(Money::from_pence(1350)));
        assert_eq!("13".parse::<Money>(), Ok(Money::from_pence(1300)));
        assert_eq!(" 0.8 ".parse::<Money>(), Ok(Money::from_pence(80)));
        assert_eq!(".05".parse::<Money>(), Ok(Money::from_pence(5)));
        assert_eq!("1.000".parse::<Money>(), Ok(Money::from_pence(100)));
        assert_eq!("-0.05".parse::<Money>(), Ok(Money::from_pence(-5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(ParseMoneyError::Empty));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(ParseMoneyError::NotANumber(_))
        ));
        assert!(matches!(
            "1.2.3".parse::<Money>(),
            Err(ParseMoneyError::NotANumber(_))
        ));
        assert!(matches!(
            ".".parse::<Money>(),
            Err(ParseMoneyError::NotANumber(_))
        ));
        assert!(matches!(
            "0.805".parse::<Money>(),
            Err(ParseMoneyError::SubPenny(_))
        ));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(ParseMoneyError::Overflow(_))
        ));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pence(150);
        let b = Money::from_pence(80);

        assert_eq!((a + b).pence(), 230);
        assert_eq!((a - b).pence(), 70);
        assert_eq!((Money::from_pence(50) * 3u32).pence(), 150);

        let mut balance = Money::zero();
        balance += Money::from_pence(100);
        balance -= Money::from_pence(20);
        assert_eq!(balance.pence(), 80);
    }

    #[test]
    fn test_multiple_of() {
        assert!(Money::from_pence(200).is_multiple_of(5));
        assert!(!Money::from_pence(201).is_multiple_of(5));
        assert!(!Money::from_pence(10).is_multiple_of(0));
    }
}
