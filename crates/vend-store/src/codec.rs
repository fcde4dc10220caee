//! # Machine Record Codec
//!
//! Converts a whole [`VendingMachine`] to and from its flat record text.
//!
//! ## Record Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line 1   owner, maxItems, modeLabel, totalMoney                        │
//! │           The Vending Company, 10, Vending Mode, 13.50                  │
//! │                                                                         │
//! │  line 2   coin counts: 5p, 10p, 20p, 50p, £1, £2                        │
//! │           10, 10, 10, 10, 5, 0                                          │
//! │                                                                         │
//! │  line 3+  name, unitPrice, quantity        (zero or more)               │
//! │           Haribo, 1.00, 10                                              │
//! │           Skittles, 0.80, 4                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are joined with `", "` and split on `,` with surrounding
//! whitespace trimmed. The session balance and item ids are not stored:
//! restored items get fresh ids in file order.
//!
//! ## Corruption
//! [`decode`] checks the whole record before handing back a machine. The
//! first problem found is reported as [`StoreError::Corrupt`]; [`restore`]
//! turns any problem into the factory-fresh machine.
//!
//! Every line after the coin line is an item; a blank line there is a
//! record with the wrong number of fields.
//!
//! Values that parse but are out of range for an item (a 3p price, a
//! `0.805` price, a quantity of 40) are normalized the same way
//! construction does, not treated as corruption.

use tracing::{debug, info, warn};

use vend_core::defaults::default_machine;
use vend_core::money::ParseMoneyError;
use vend_core::{Coin, CoinTill, MachineMode, Money, VendingMachine, MAX_UNIT_PRICE_PENCE};

use crate::error::{StoreError, StoreResult};

const FIELD_SEPARATOR: &str = ", ";

const HEADER_FIELDS: usize = 4;
const ITEM_FIELDS: usize = 3;

// =============================================================================
// Encoding
// =============================================================================

/// Renders the machine as record text, one record per line.
pub fn encode(machine: &VendingMachine) -> String {
    let mut lines = Vec::with_capacity(2 + machine.item_count());

    lines.push(
        [
            machine.owner().to_string(),
            machine.max_items().to_string(),
            machine.mode().label().to_string(),
            machine.total_money().to_major_string(),
        ]
        .join(FIELD_SEPARATOR),
    );

    lines.push(
        machine
            .till()
            .counts()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR),
    );

    for item in machine.items() {
        lines.push(
            [
                item.name().to_string(),
                item.unit_price().to_major_string(),
                item.quantity().to_string(),
            ]
            .join(FIELD_SEPARATOR),
        );
    }

    let mut text = lines.join("\n");
    text.push('\n');

    debug!(
        items = machine.item_count(),
        total = %machine.total_money(),
        bytes = text.len(),
        "Encoded machine record"
    );

    text
}

// =============================================================================
// Decoding
// =============================================================================

/// Parses record text into a machine.
///
/// The returned machine is in the recorded mode with a zero session balance.
pub fn decode(text: &str) -> StoreResult<VendingMachine> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| StoreError::corrupt(1, "missing header line"))?;
    let header = split_fields(header);
    expect_fields(line_no, &header, HEADER_FIELDS, "header")?;

    let owner = header[0];
    if owner.is_empty() {
        return Err(StoreError::corrupt(line_no, "owner is blank"));
    }
    let max_items = parse_integer(line_no, "maxItems", header[1])?;
    let mode = MachineMode::from_label(header[2]).ok_or_else(|| {
        StoreError::corrupt(line_no, format!("unknown mode '{}'", header[2]))
    })?;
    let declared_total = parse_money(line_no, "totalMoney", header[3])?;

    let (line_no, coin_line) = lines
        .next()
        .ok_or_else(|| StoreError::corrupt(2, "missing coin line"))?;
    let till = decode_till(line_no, coin_line)?;

    if till.total() != declared_total {
        return Err(StoreError::corrupt(
            line_no,
            format!(
                "coins add up to {} but the recorded total is {}",
                till.total(),
                declared_total
            ),
        ));
    }

    let mut machine = VendingMachine::from_parts(owner, max_items, mode, till);

    for (line_no, line) in lines {
        let fields = split_fields(line);
        expect_fields(line_no, &fields, ITEM_FIELDS, "item")?;

        let name = fields[0];
        if name.is_empty() {
            return Err(StoreError::corrupt(line_no, "item name is blank"));
        }
        let price = parse_item_price(line_no, fields[1])?;
        let quantity = parse_integer(line_no, "quantity", fields[2])?;

        if machine.is_full() {
            return Err(StoreError::corrupt(
                line_no,
                format!("machine holds at most {} items", machine.max_items()),
            ));
        }

        let item = machine.create_item(name, price, quantity);
        machine
            .add_item(item)
            .map_err(|e| StoreError::corrupt(line_no, e.to_string()))?;
    }

    debug!(
        owner = machine.owner(),
        items = machine.item_count(),
        mode = %machine.mode(),
        "Decoded machine record"
    );

    Ok(machine)
}

/// Parses record text, falling back to the factory-fresh machine.
///
/// `None` means there is no record yet (first run).
pub fn restore(text: Option<&str>) -> VendingMachine {
    let Some(text) = text else {
        info!("No machine record found, starting with the default machine");
        return default_machine();
    };

    match decode(text) {
        Ok(machine) => machine,
        Err(e) => {
            warn!(error = %e, "Machine record is unusable, starting with the default machine");
            default_machine()
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn expect_fields(line_no: usize, fields: &[&str], expected: usize, what: &str) -> StoreResult<()> {
    if fields.len() != expected {
        return Err(StoreError::corrupt(
            line_no,
            format!(
                "{} needs {} fields, found {}",
                what,
                expected,
                fields.len()
            ),
        ));
    }
    Ok(())
}

fn parse_integer(line_no: usize, field: &str, value: &str) -> StoreResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| StoreError::corrupt(line_no, format!("{} '{}' is not a number", field, value)))
}

fn parse_money(line_no: usize, field: &str, value: &str) -> StoreResult<Money> {
    value
        .parse::<Money>()
        .map_err(|e| StoreError::corrupt(line_no, format!("{}: {}", field, e)))
}

/// Item prices finer than a penny are out of range, not malformed: they
/// become the maximum price like any other invalid price.
fn parse_item_price(line_no: usize, value: &str) -> StoreResult<Money> {
    match value.parse::<Money>() {
        Ok(price) => Ok(price),
        Err(ParseMoneyError::SubPenny(_)) => Ok(Money::from_pence(MAX_UNIT_PRICE_PENCE)),
        Err(e) => Err(StoreError::corrupt(line_no, format!("price: {}", e))),
    }
}

fn decode_till(line_no: usize, line: &str) -> StoreResult<CoinTill> {
    let fields = split_fields(line);
    expect_fields(line_no, &fields, Coin::ALL.len(), "coin line")?;

    let mut till = CoinTill::new();
    for (coin, value) in Coin::ALL.into_iter().zip(fields) {
        let label = format!("{} count", coin.label());
        let count = parse_integer(line_no, &label, value)?;
        if count < 0 {
            return Err(StoreError::corrupt(
                line_no,
                format!("{} is negative ({})", label, count),
            ));
        }
        if u32::try_from(count).is_err() {
            return Err(StoreError::corrupt(
                line_no,
                format!("{} is too large ({})", label, count),
            ));
        }
        till.set_count(coin, count);
    }

    Ok(till)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_RECORD: &str = "\
The Vending Company, 10, Vending Mode, 13.50
10, 10, 10, 10, 5, 0
Haribo, 1.00, 10
Skittles, 0.80, 4
Snickers, 0.80, 0
Coke, 1.20, 1
Diet Coke, 1.20, 5
Toffee Crisp, 0.90, 2
";

    fn corrupt_line(text: &str) -> usize {
        match decode(text) {
            Err(StoreError::Corrupt { line, .. }) => line,
            other => panic!("expected corruption, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_default_machine() {
        assert_eq!(encode(&default_machine()), DEFAULT_RECORD);
    }

    #[test]
    fn test_decode_default_record() {
        assert_eq!(decode(DEFAULT_RECORD).unwrap(), default_machine());
    }

    #[test]
    fn test_decode_tolerates_spacing() {
        let text = "Bob ,3,Service Mode,  0.8\n0,0,4,0,0,0\nGum,0.3,2\n";
        let machine = decode(text).unwrap();
        assert_eq!(machine.owner(), "Bob");
        assert_eq!(machine.max_items(), 3);
        assert_eq!(machine.mode(), MachineMode::Service);
        assert_eq!(machine.total_money(), Money::from_pence(80));
        assert_eq!(machine.item(0).unwrap().unit_price(), Money::from_pence(30));
        assert!(machine.session_balance().is_zero());
    }

    #[test]
    fn test_decode_normalizes_out_of_range_values() {
        let text = "Owner, 0, Vending Mode, 0.00\n0, 0, 0, 0, 0, 0\nGum, 0.03, 40\n";
        let machine = decode(text).unwrap();
        assert_eq!(machine.max_items(), 10);
        let item = machine.item(0).unwrap();
        assert_eq!(item.unit_price(), Money::from_pence(200));
        assert_eq!(item.quantity(), 0);
    }

    #[test]
    fn test_sub_penny_item_price_becomes_maximum() {
        let text = "Owner, 10, Vending Mode, 0.00\n0, 0, 0, 0, 0, 0\nGum, 0.805, 1\n";
        let machine = decode(text).unwrap();
        let item = machine.item(0).unwrap();
        assert_eq!(item.name(), "Gum");
        assert_eq!(item.unit_price(), Money::from_pence(200));
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_sub_penny_total_is_corrupt() {
        assert_eq!(
            corrupt_line("Owner, 10, Vending Mode, 0.005\n0, 0, 0, 0, 0, 0\n"),
            1
        );
    }

    #[test]
    fn test_blank_item_line_is_corrupt() {
        let text = "Owner, 10, Vending Mode, 0.00\n0, 0, 0, 0, 0, 0\nGum, 0.30, 1\n\nMints, 0.40, 2\n";
        assert_eq!(corrupt_line(text), 4);
        assert_eq!(restore(Some(text)), default_machine());

        let trailing = "Owner, 10, Vending Mode, 0.00\n0, 0, 0, 0, 0, 0\nGum, 0.30, 1\n\n";
        assert_eq!(corrupt_line(trailing), 4);
    }

    #[test]
    fn test_full_coin_counter_refuses_next_coin() {
        let text = "Owner, 10, Vending Mode, 214748364.75\n4294967295, 0, 0, 0, 0, 0\n";
        let mut machine = decode(text).unwrap();
        let total = machine.total_money();

        assert!(machine.insert_coin(Coin::FivePence).is_err());
        assert_eq!(machine.total_money(), total);
        assert!(machine.session_balance().is_zero());
        assert_eq!(machine.insert_coin(Coin::TenPence), Ok(Money::from_pence(10)));
    }

    #[test]
    fn test_missing_lines() {
        assert_eq!(corrupt_line(""), 1);
        assert_eq!(corrupt_line("Owner, 10, Vending Mode, 0.00\n"), 2);
    }

    #[test]
    fn test_header_defects() {
        assert_eq!(corrupt_line("Owner, 10, Vending Mode\n0,0,0,0,0,0\n"), 1);
        assert_eq!(corrupt_line(" , 10, Vending Mode, 0.00\n0,0,0,0,0,0\n"), 1);
        assert_eq!(corrupt_line("Owner, ten, Vending Mode, 0.00\n0,0,0,0,0,0\n"), 1);
        assert_eq!(corrupt_line("Owner, 10, Party Mode, 0.00\n0,0,0,0,0,0\n"), 1);
        assert_eq!(corrupt_line("Owner, 10, Vending Mode, lots\n0,0,0,0,0,0\n"), 1);
    }

    #[test]
    fn test_coin_line_defects() {
        assert_eq!(corrupt_line("Owner, 10, Vending Mode, 0.00\n0,0,0,0,0\n"), 2);
        assert_eq!(corrupt_line("Owner, 10, Vending Mode, 0.00\n0,0,x,0,0,0\n"), 2);
        assert_eq!(corrupt_line("Owner, 10, Vending Mode, 0.00\n0,0,-1,0,0,0\n"), 2);
    }

    #[test]
    fn test_total_mismatch_is_corrupt() {
        let text = DEFAULT_RECORD.replace("13.50", "13.55");
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { line: 2, .. }));
        assert!(err.to_string().contains("£13.50"));
    }

    #[test]
    fn test_item_defects() {
        let base = "Owner, 2, Vending Mode, 0.00\n0,0,0,0,0,0\n";
        assert_eq!(corrupt_line(&format!("{base}Gum, 0.30\n")), 3);
        assert_eq!(corrupt_line(&format!("{base} , 0.30, 1\n")), 3);
        assert_eq!(corrupt_line(&format!("{base}Gum, free, 1\n")), 3);
        assert_eq!(corrupt_line(&format!("{base}Gum, 0.30, some\n")), 3);
        assert_eq!(
            corrupt_line(&format!("{base}A, 0.30, 1\nB, 0.30, 1\nC, 0.30, 1\n")),
            5
        );
    }

    #[test]
    fn test_restore_falls_back_to_defaults() {
        assert_eq!(restore(None), default_machine());
        assert_eq!(restore(Some("garbage")), default_machine());
        assert_eq!(
            restore(Some(&DEFAULT_RECORD.replace("13.50", "99.00"))),
            restore(None)
        );
    }

    #[test]
    fn test_restore_keeps_valid_record() {
        let mut machine = default_machine();
        machine.insert_coin(Coin::TwoPounds).unwrap();
        machine.set_mode(MachineMode::Service);

        let restored = restore(Some(&encode(&machine)));
        assert_eq!(restored.mode(), MachineMode::Service);
        assert_eq!(restored.total_money(), Money::from_pence(1550));
        assert!(restored.session_balance().is_zero());
    }
}
