//! Point-in-time export of the inventory.
//!
//! The snapshot is write-only: it is meant for archiving and hand-off, there
//! is no path that loads one back into an [`Inventory`](crate::Inventory).
//! [`InventorySnapshot::write_to`] is the one file write in this crate.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use circuloop_core::AssetId;

use crate::asset::{Asset, DeviceCategory};
use crate::strategy::DisposalStrategy;

/// Flat record of every attribute of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: AssetId,
    pub name: String,
    pub model: String,
    pub category: DeviceCategory,
    pub age_years: f64,
    pub battery_health: u8,
    pub can_refurbish: bool,
    pub is_hazardous: bool,
    pub status: String,
    pub location: String,
    pub last_used: Option<DateTime<Utc>>,
    pub disposal_strategy: DisposalStrategy,
}

impl From<&Asset> for AssetRecord {
    fn from(asset: &Asset) -> Self {
        Self {
            asset_id: asset.id_typed(),
            name: asset.name().to_string(),
            model: asset.model().to_string(),
            category: asset.category(),
            age_years: asset.age_years(),
            battery_health: asset.battery_health(),
            can_refurbish: asset.can_refurbish(),
            is_hazardous: asset.is_hazardous(),
            status: asset.status().to_string(),
            location: asset.location().to_string(),
            last_used: asset.last_used(),
            disposal_strategy: asset.disposal_strategy(),
        }
    }
}

/// `{ assets, marketplace, timestamp }` as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub assets: BTreeMap<AssetId, AssetRecord>,
    pub marketplace: Vec<AssetId>,
    pub timestamp: DateTime<Utc>,
}

impl InventorySnapshot {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the snapshot as pretty JSON, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
