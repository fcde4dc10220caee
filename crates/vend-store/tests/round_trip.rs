//! Codec round-trip and fallback tests.

use proptest::prelude::*;
use vend_core::defaults::default_machine;
use vend_core::{Coin, CoinTill, MachineMode, Money, PurchaseOutcome, VendingMachine};
use vend_store::{decode, encode, restore, StoreError};

/// Builds a machine from generated parts. Out-of-range values go through
/// the same normalization as any other construction.
fn build_machine(
    owner: &str,
    capacity: i64,
    service: bool,
    counts: [u32; 6],
    items: &[(String, i64, i64)],
) -> VendingMachine {
    let mode = if service {
        MachineMode::Service
    } else {
        MachineMode::Vending
    };
    let mut machine =
        VendingMachine::from_parts(owner, capacity, mode, CoinTill::from_counts(counts));
    for (name, price, quantity) in items {
        let item = machine.create_item(name, Money::from_pence(*price), *quantity);
        if machine.add_item(item).is_err() {
            break;
        }
    }
    machine
}

fn item_strategy() -> impl Strategy<Value = (String, i64, i64)> {
    ("[A-Za-z0-9 ]{0,12}", -20i64..260, -3i64..14)
}

proptest! {
    #[test]
    fn prop_encode_decode_encode_is_stable(
        owner in "[A-Za-z ]{0,20}",
        capacity in -2i64..12,
        service in any::<bool>(),
        counts in proptest::array::uniform6(0u32..60),
        items in proptest::collection::vec(item_strategy(), 0..12),
    ) {
        let machine = build_machine(&owner, capacity, service, counts, &items);
        let text = encode(&machine);

        let decoded = decode(&text).expect("encoded record should decode");
        prop_assert_eq!(encode(&decoded), text);

        prop_assert_eq!(decoded.owner(), machine.owner());
        prop_assert_eq!(decoded.max_items(), machine.max_items());
        prop_assert_eq!(decoded.mode(), machine.mode());
        prop_assert_eq!(decoded.till(), machine.till());
        prop_assert_eq!(decoded.item_count(), machine.item_count());
        for (restored, source) in decoded.items().iter().zip(machine.items()) {
            prop_assert_eq!(restored.name(), source.name());
            prop_assert_eq!(restored.unit_price(), source.unit_price());
            prop_assert_eq!(restored.quantity(), source.quantity());
        }
    }
}

#[test]
fn test_default_record_round_trips_exactly() {
    let machine = default_machine();
    assert_eq!(decode(&encode(&machine)).unwrap(), machine);
}

#[test]
fn test_state_after_trading_survives_round_trip() {
    let mut machine = default_machine();
    machine.insert_coin(Coin::TwoPounds).unwrap();
    let outcome = machine.purchase(3).unwrap();
    assert!(matches!(outcome, PurchaseOutcome::Delivered(_)));

    let restored = decode(&encode(&machine)).unwrap();
    assert_eq!(restored.total_money(), machine.total_money());
    assert_eq!(restored.till(), machine.till());
    // Coke sold out, but other items still have stock
    assert_eq!(restored.item(3).unwrap().quantity(), 0);
    assert_eq!(restored.mode(), MachineMode::Vending);
}

#[test]
fn test_till_mismatch_yields_default_machine() {
    let mut machine = default_machine();
    machine.set_mode(MachineMode::Service);
    let text = encode(&machine).replacen("13.50", "12.00", 1);

    assert!(matches!(decode(&text), Err(StoreError::Corrupt { line: 2, .. })));
    assert_eq!(restore(Some(&text)), restore(None));
    assert_eq!(restore(Some(&text)).mode(), MachineMode::Vending);
}

#[test]
fn test_restored_ids_are_fresh() {
    let mut machine = default_machine();
    machine.set_mode(MachineMode::Service);
    machine.reset().unwrap();
    machine.set_mode(MachineMode::Service);
    machine
        .add_new_item("Gum", Money::from_pence(30), 3)
        .unwrap();
    assert_eq!(machine.item(0).unwrap().id().get(), 7);

    let restored = decode(&encode(&machine)).unwrap();
    assert_eq!(restored.item(0).unwrap().id().get(), 1);
    assert_eq!(restored.item(0).unwrap().name(), "Gum");
}
