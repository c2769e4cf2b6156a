//! Campus asset inventory and disposal planning.
//!
//! This crate contains the business rules for tracking electronic assets and
//! deciding their end-of-life path, implemented purely as deterministic
//! domain logic. The only IO is writing a snapshot file.

pub mod asset;
pub mod inventory;
pub mod search;
pub mod snapshot;
pub mod strategy;

pub use asset::{
    Asset, AssetAttributes, AssetField, AssetUpdate, DEFAULT_LOCATION, DeviceCategory,
    STATUS_DORMANT, STATUS_IN_USE,
};
pub use inventory::{Inventory, MigrationReport, ProcurementCheck};
pub use search::{FieldMatch, SearchCriteria};
pub use snapshot::{AssetRecord, InventorySnapshot};
pub use strategy::{DisposalStrategy, classify};
