//! CircuLoop demo: seeds the sample campus inventory, runs the procurement
//! check, prints the marketplace and migration report, exports a snapshot.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use circuloop_inventory::{AssetAttributes, DeviceCategory, Inventory, InventorySnapshot};

mod render;

#[derive(Parser)]
#[command(name = "circuloop-demo")]
#[command(version)]
#[command(about = "Near-zero e-waste campus inventory demo", long_about = None)]
struct Cli {
    /// Where to write the JSON snapshot
    #[arg(long, value_name = "FILE", env = "CIRCULOOP_EXPORT_PATH", default_value = "inventory.json")]
    export: PathBuf,

    /// Do not write a snapshot file
    #[arg(long)]
    skip_export: bool,

    /// Device name for the procurement check
    #[arg(long, default_value = "Laptop")]
    device: String,

    /// Device category for the procurement check
    #[arg(long, default_value = "Laptop", value_parser = parse_category)]
    category: DeviceCategory,
}

fn parse_category(s: &str) -> Result<DeviceCategory, String> {
    s.parse().map_err(|e: circuloop_core::DomainError| e.to_string())
}

fn main() -> Result<()> {
    circuloop_observability::init();
    let cli = Cli::parse();

    let inventory = seed_inventory();
    print!("{}", render::asset_table(&inventory));

    let check = inventory.check_procurement_prevention(&cli.device, cli.category);
    print!("{}", render::procurement(&check));
    print!("{}", render::marketplace(&inventory));
    print!("{}", render::migration_report(&inventory.generate_migration_report()));

    if !cli.skip_export {
        let snapshot = inventory.export_snapshot();
        write_snapshot(&snapshot, &cli.export)?;
        println!("Inventory exported to {}", cli.export.display());
    }

    Ok(())
}

fn seed_inventory() -> Inventory {
    let mut inventory = Inventory::new();
    inventory.add(
        AssetAttributes::new("Laptop", "ThinkPad X1", DeviceCategory::Laptop, 1.5)
            .with_battery_health(85),
    );
    inventory.add(
        AssetAttributes::new("Lab Refrigerator", "Samsung-400L", DeviceCategory::LabEquipment, 4.0)
            .with_can_refurbish(false),
    );
    inventory.add(
        AssetAttributes::new("LED Bulb", "Philips-12W", DeviceCategory::Consumable, 0.5)
            .with_can_refurbish(false)
            .with_hazardous(true),
    );
    inventory.add(
        AssetAttributes::new("MacBook Pro", "M1-2021", DeviceCategory::Laptop, 2.0)
            .with_battery_health(90),
    );
    inventory
}

fn write_snapshot(snapshot: &InventorySnapshot, path: &Path) -> Result<()> {
    snapshot
        .write_to(path)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    tracing::info!(path = %path.display(), assets = snapshot.assets.len(), "snapshot exported");
    Ok(())
}
