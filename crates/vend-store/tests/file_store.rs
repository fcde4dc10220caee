//! File-backed store tests.

use std::fs;

use tempfile::TempDir;
use vend_core::defaults::default_machine;
use vend_core::{Coin, MachineMode, Money};
use vend_store::{MachineStore, StoreConfig, StoreError};

fn store_in(dir: &TempDir) -> MachineStore {
    MachineStore::new(StoreConfig::new(dir.path().join("machineData.csv")))
}

#[test]
fn test_first_run_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(!store.exists());
    assert_eq!(store.load(), default_machine());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut machine = default_machine();
    machine.insert_coin(Coin::OnePound).unwrap();
    machine.insert_coin(Coin::FiftyPence).unwrap();
    machine.purchase(1).unwrap();
    machine.set_mode(MachineMode::Service);
    machine.restock(2, 6).unwrap();

    store.save(&machine).unwrap();
    assert!(store.exists());

    let loaded = store.load();
    assert_eq!(loaded.mode(), MachineMode::Service);
    assert_eq!(loaded.total_money(), machine.total_money());
    assert_eq!(loaded.item(1).unwrap().quantity(), 3);
    assert_eq!(loaded.item(2).unwrap().quantity(), 6);
    assert!(loaded.session_balance().is_zero());
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("machineData.csv");
    let store = MachineStore::new(StoreConfig::new(&path));

    store.save(&default_machine()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("The Vending Company, 10, Vending Mode, 13.50\n"));
}

#[test]
fn test_corrupt_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), "Owner, 10, Vending Mode, 1.00\n0, 0, 0, 0, 0, 0\n").unwrap();

    assert_eq!(store.load(), default_machine());
}

#[test]
fn test_save_overwrites_previous_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&default_machine()).unwrap();

    let mut machine = default_machine();
    machine.set_mode(MachineMode::Service);
    machine.reset().unwrap();
    store.save(&machine).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.item_count(), 0);
    assert_eq!(loaded.total_money(), Money::zero());
}

#[test]
fn test_save_into_a_file_path_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let store = MachineStore::new(StoreConfig::new(blocker.join("machineData.csv")));
    let err = store.save(&default_machine()).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}
