//! # Machine File Seeder
//!
//! Writes a factory-fresh machine record for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default location (platform data dir or VEND_DATA_PATH)
//! cargo run -p vend-store --bin seed
//!
//! # Specify the record file
//! cargo run -p vend-store --bin seed -- --db ./data/machineData.csv
//!
//! # Overwrite an existing record and print the machine as JSON
//! cargo run -p vend-store --bin seed -- --force --json
//! ```
//!
//! ## Seeded Machine
//! - Owner "The Vending Company", room for 10 items
//! - Haribo, Skittles, Snickers, Coke, Diet Coke, Toffee Crisp
//! - £13.50 in the till

use std::env;

use tracing_subscriber::EnvFilter;
use vend_core::defaults::default_machine;
use vend_store::{MachineStore, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config = StoreConfig::from_env();
    let mut force = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config = StoreConfig::new(&args[i + 1]);
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--json" | "-j" => json = true,
            "--help" | "-h" => {
                println!("Vending Machine Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Record file path (default: platform data dir)");
                println!("  -f, --force        Overwrite an existing record file");
                println!("  -j, --json         Print the seeded machine as JSON");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let store = MachineStore::new(config);

    println!("🌱 Vending Machine Seeder");
    println!("========================");
    println!("Record file: {}", store.path().display());
    println!();

    if store.exists() && !force {
        println!("⚠ A machine record already exists");
        println!("  Skipping seed to keep its contents.");
        println!("  Pass --force to overwrite it.");
        return Ok(());
    }

    let machine = default_machine();
    store.save(&machine)?;

    println!("✓ Wrote {} items", machine.item_count());
    println!("✓ Till holds {}", machine.total_money());

    if json {
        println!();
        println!("{}", serde_json::to_string_pretty(&machine.system_info())?);
    }

    Ok(())
}

/// Initializes tracing output for the seeder.
///
/// Honors `RUST_LOG`; defaults to `info,vend=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vend=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
