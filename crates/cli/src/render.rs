//! Plain-text views of the inventory for terminal output.

use std::fmt::Write;

use circuloop_inventory::{Inventory, MigrationReport, ProcurementCheck};

const RULE: &str = "================================================================================";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{RULE}\n{title}\n{RULE}");
}

pub fn asset_table(inventory: &Inventory) -> String {
    let mut out = String::new();
    heading(&mut out, "FULL CAMPUS ASSET REPOSITORY");
    if inventory.is_empty() {
        out.push_str("No devices found. Add assets to begin tracking.\n");
        return out;
    }
    for asset in inventory.assets() {
        let _ = writeln!(out, "{asset}");
    }
    let _ = writeln!(out, "\nTotal Assets: {}", inventory.len());
    out
}

pub fn procurement(check: &ProcurementCheck<'_>) -> String {
    let mut out = String::new();
    if check.is_approved() {
        let _ = writeln!(
            out,
            "\nNo dormant {} found. New purchase approved for {}.",
            check.device_name(),
            check.category()
        );
        return out;
    }
    let _ = writeln!(
        out,
        "\nPROCUREMENT BLOCKED: {} dormant '{}' in storage:",
        check.matches().len(),
        check.device_name()
    );
    for asset in check.matches() {
        let _ = writeln!(
            out,
            "  - {}: Battery {}%, Age {:?}yr",
            asset.id_typed(),
            asset.battery_health(),
            asset.age_years()
        );
    }
    out.push_str("  Recommendation: use existing stock to prevent e-waste\n");
    out
}

pub fn marketplace(inventory: &Inventory) -> String {
    let mut out = String::new();
    heading(&mut out, "CAMPUS MARKETPLACE - Refurbished Devices");
    let listings = inventory.marketplace_listings();
    if listings.is_empty() {
        out.push_str("No items currently listed.\n");
        return out;
    }
    for asset in listings {
        let _ = writeln!(
            out,
            "{} ({})\n   Battery: {}% | Age: {:?}yr\n",
            asset.name(),
            asset.model(),
            asset.battery_health(),
            asset.age_years()
        );
    }
    out
}

pub fn migration_report(report: &MigrationReport<'_>) -> String {
    let mut out = String::new();
    heading(&mut out, "MIGRATION READINESS REPORT - Transit to Permanent Campus");
    for (strategy, assets) in report.groups() {
        let _ = writeln!(out, "\n{strategy}: {} items", assets.len());
        for asset in assets {
            let _ = writeln!(out, "  - {}: {} ({})", asset.id_typed(), asset.name(), asset.model());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuloop_inventory::{AssetAttributes, DeviceCategory};

    fn one_of_each() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(AssetAttributes::new("Laptop", "X1", DeviceCategory::Laptop, 1.0).with_battery_health(90));
        inv.add(AssetAttributes::new("Tablet", "T2", DeviceCategory::Laptop, 4.0).with_battery_health(60));
        inv
    }

    #[test]
    fn empty_inventory_message() {
        let out = asset_table(&Inventory::new());
        assert!(out.contains("No devices found"));
        assert!(marketplace(&Inventory::new()).contains("No items currently listed."));
    }

    #[test]
    fn table_lists_every_asset() {
        let out = asset_table(&one_of_each());
        assert!(out.contains("ID: ASSET-0001 | Laptop (X1)"));
        assert!(out.contains("Total Assets: 2"));
    }

    #[test]
    fn marketplace_shows_listed_devices() {
        let out = marketplace(&one_of_each());
        assert!(out.contains("Tablet (T2)"));
        assert!(out.contains("Battery: 60% | Age: 4.0yr"));
        assert!(!out.contains("Laptop (X1)"));
    }

    #[test]
    fn report_groups_by_label() {
        let inv = one_of_each();
        let out = migration_report(&inv.generate_migration_report());
        assert!(out.contains("Relocate to Permanent Campus: 1 items"));
        assert!(out.contains("Sell on Marketplace: 1 items"));
        assert!(out.contains("  - ASSET-0002: Tablet (T2)"));
    }

    #[test]
    fn procurement_views() {
        let inv = one_of_each();
        let blocked = procurement(&inv.check_procurement_prevention("laptop", DeviceCategory::Laptop));
        assert!(blocked.contains("PROCUREMENT BLOCKED: 1 dormant 'laptop'"));
        assert!(blocked.contains("ASSET-0001: Battery 90%, Age 1.0yr"));

        let approved = procurement(&inv.check_procurement_prevention("Projector", DeviceCategory::Peripheral));
        assert!(approved.contains("New purchase approved for Peripheral."));
    }
}
