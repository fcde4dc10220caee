//! # Validation Module
//!
//! Input normalization and validation for the vending machine.
//!
//! ## Two Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Handling                                     │
//! │                                                                         │
//! │  normalize_*  (construction, restore from file)                        │
//! │  ├── Never fails                                                        │
//! │  └── Bad value → fixed fallback                                         │
//! │        name ──► "Unassigned"    price ──► £2.00    quantity ──► 0       │
//! │                                                                         │
//! │  validate_*   (admin "add new item")                                    │
//! │  ├── Rejects bad input with a ValidationError                           │
//! │  └── Nothing is created                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The fallbacks are part of the machine's contract: a restored record with
//! a 3p price comes back as a £2.00 item, not as an error.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{
    DEFAULT_MAX_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_PENCE, PRICE_STEP_PENCE, UNASSIGNED,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Normalizers
// =============================================================================

/// Checks whether a trimmed display name can be stored and displayed.
///
/// Names end up as fields of a comma-separated record, one record per line,
/// so commas and line breaks are not allowed.
fn is_usable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains([',', '\n', '\r'])
}

/// Normalizes an item or owner name.
///
/// ## Example
/// ```rust
/// use vend_core::validation::normalize_name;
///
/// assert_eq!(normalize_name("  Haribo "), "Haribo");
/// assert_eq!(normalize_name(""), "Unassigned");
/// assert_eq!(normalize_name("Salt, Vinegar"), "Unassigned");
/// ```
pub fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if is_usable_name(name) {
        name.to_string()
    } else {
        UNASSIGNED.to_string()
    }
}

/// Normalizes a unit price.
///
/// Valid prices are a positive multiple of 5p up to £2.00; anything else
/// becomes £2.00.
pub fn normalize_price(price: Money) -> Money {
    if price_in_range(price) {
        price
    } else {
        Money::from_pence(MAX_UNIT_PRICE_PENCE)
    }
}

/// Normalizes a stock quantity: values outside `0..=10` become 0.
pub fn normalize_quantity(quantity: i64) -> i64 {
    if (0..=MAX_ITEM_QUANTITY).contains(&quantity) {
        quantity
    } else {
        0
    }
}

/// Normalizes a catalog capacity: non-positive values become 10.
pub fn normalize_capacity(max_items: i64) -> usize {
    match usize::try_from(max_items) {
        Ok(max) if max > 0 => max,
        _ => DEFAULT_MAX_ITEMS,
    }
}

fn price_in_range(price: Money) -> bool {
    price.is_positive()
        && price.pence() <= MAX_UNIT_PRICE_PENCE
        && price.is_multiple_of(PRICE_STEP_PENCE)
}

// =============================================================================
// Validators
// =============================================================================

/// Validates a new item name.
///
/// ## Rules
/// - Must not be blank
/// - Must not contain commas or line breaks
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if !is_usable_name(name) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not contain commas or line breaks".to_string(),
        });
    }

    Ok(())
}

/// Validates a new item price.
///
/// ## Rules
/// - Greater than 0p and at most £2.00
/// - A multiple of 5p
///
/// ## Example
/// ```rust
/// use vend_core::money::Money;
/// use vend_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_pence(85)).is_ok());
/// assert!(validate_price(Money::from_pence(0)).is_err());
/// assert!(validate_price(Money::from_pence(205)).is_err());
/// assert!(validate_price(Money::from_pence(83)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() || price.pence() > MAX_UNIT_PRICE_PENCE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: PRICE_STEP_PENCE,
            max: MAX_UNIT_PRICE_PENCE,
        });
    }

    if !price.is_multiple_of(PRICE_STEP_PENCE) {
        return Err(ValidationError::NotMultipleOf {
            field: "price".to_string(),
            step: PRICE_STEP_PENCE,
        });
    }

    Ok(())
}

/// Validates a new item's starting quantity (0 to 10 inclusive).
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if !(0..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Coke"), "Coke");
        assert_eq!(normalize_name("   "), UNASSIGNED);
        assert_eq!(normalize_name("Two\nLines"), UNASSIGNED);
        assert_eq!(normalize_name("A,B"), UNASSIGNED);
        assert_eq!(normalize_name("Carriage\rReturn"), UNASSIGNED);
    }

    #[test]
    fn test_normalize_name_keeps_tabs() {
        assert_eq!(normalize_name("Salt\tVinegar"), "Salt\tVinegar");
        assert!(validate_item_name("Salt\tVinegar").is_ok());
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price(Money::from_pence(80)).pence(), 80);
        assert_eq!(normalize_price(Money::from_pence(200)).pence(), 200);
        assert_eq!(normalize_price(Money::from_pence(5)).pence(), 5);
        assert_eq!(normalize_price(Money::from_pence(0)).pence(), 200);
        assert_eq!(normalize_price(Money::from_pence(-50)).pence(), 200);
        assert_eq!(normalize_price(Money::from_pence(205)).pence(), 200);
        assert_eq!(normalize_price(Money::from_pence(83)).pence(), 200);
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(0), 0);
        assert_eq!(normalize_quantity(10), 10);
        assert_eq!(normalize_quantity(11), 0);
        assert_eq!(normalize_quantity(-3), 0);
    }

    #[test]
    fn test_normalize_capacity() {
        assert_eq!(normalize_capacity(4), 4);
        assert_eq!(normalize_capacity(0), DEFAULT_MAX_ITEMS);
        assert_eq!(normalize_capacity(-1), DEFAULT_MAX_ITEMS);
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Toffee Crisp").is_ok());
        assert!(matches!(
            validate_item_name("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_item_name("Fish, Chips"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_pence(5)).is_ok());
        assert!(validate_price(Money::from_pence(200)).is_ok());
        assert!(matches!(
            validate_price(Money::from_pence(0)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_price(Money::from_pence(12)),
            Err(ValidationError::NotMultipleOf { step: 5, .. })
        ));
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(10).is_ok());
        assert!(validate_stock_quantity(11).is_err());
        assert!(validate_stock_quantity(-1).is_err());
    }
}
