use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use circuloop_core::{AssetId, DomainError, DomainResult};

use crate::asset::{Asset, AssetAttributes, AssetUpdate, DeviceCategory};
use crate::search::SearchCriteria;
use crate::snapshot::{AssetRecord, InventorySnapshot};
use crate::strategy::DisposalStrategy;

/// Campus asset inventory.
///
/// Owns every [`Asset`] and the marketplace index, and keeps both in step:
/// each mutation reclassifies the affected asset and re-syncs the index in
/// the same call. Identifiers are allocated sequentially and never reused.
///
/// The inventory is a plain value. Callers that need to share it across
/// threads wrap the whole thing in one lock so the map and the index are
/// always updated together.
#[derive(Debug, Clone)]
pub struct Inventory {
    assets: BTreeMap<AssetId, Asset>,
    marketplace: Vec<AssetId>,
    next_id: u64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            assets: BTreeMap::new(),
            marketplace: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a device and classify it. Never fails.
    pub fn add(&mut self, attributes: AssetAttributes) -> AssetId {
        let id = AssetId::from_sequence(self.next_id);
        self.next_id += 1;

        let asset = Asset::new(id, attributes);
        let strategy = asset.disposal_strategy();
        tracing::info!(
            asset_id = %id,
            name = asset.name(),
            category = %asset.category(),
            strategy = %strategy,
            "asset added"
        );
        self.assets.insert(id, asset);

        self.sync_marketplace(id, strategy);
        announce_strategy(id, strategy);
        id
    }

    /// Remove an asset. Returns `false` if the identifier is unknown.
    pub fn delete(&mut self, id: AssetId) -> bool {
        let Some(asset) = self.assets.remove(&id) else {
            tracing::warn!(asset_id = %id, "delete: asset not found");
            return false;
        };
        self.marketplace.retain(|listed| *listed != id);
        tracing::info!(asset_id = %id, name = asset.name(), "asset deleted");
        true
    }

    /// Apply a batch of field changes, then reclassify.
    ///
    /// An empty batch leaves every attribute untouched and reproduces the same
    /// strategy. The marketplace index follows the new strategy.
    pub fn update<I>(&mut self, id: AssetId, changes: I) -> DomainResult<&Asset>
    where
        I: IntoIterator<Item = AssetUpdate>,
    {
        let now = Utc::now();
        let asset = self
            .assets
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))?;

        let previous = asset.disposal_strategy();
        for change in changes {
            asset.apply(change, now);
        }
        let strategy = asset.reclassify();

        if strategy != previous {
            tracing::info!(
                asset_id = %id,
                from = %previous,
                to = %strategy,
                "asset updated; strategy changed"
            );
        } else {
            tracing::info!(asset_id = %id, strategy = %strategy, "asset updated");
        }

        self.sync_marketplace(id, strategy);
        if strategy != previous {
            announce_strategy(id, strategy);
        }

        self.assets
            .get(&id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))
    }

    /// String-keyed variant of [`Inventory::update`].
    ///
    /// Every pair is parsed before anything is written, so an unknown field or
    /// malformed value leaves the asset unchanged.
    pub fn update_fields<'a, I>(&mut self, id: AssetId, fields: I) -> DomainResult<&Asset>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        if !self.assets.contains_key(&id) {
            return Err(DomainError::not_found(id.to_string()));
        }
        let changes = fields
            .into_iter()
            .map(|(field, value)| AssetUpdate::parse(field, value))
            .collect::<DomainResult<Vec<_>>>()?;
        self.update(id, changes)
    }

    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    /// All assets in identifier order.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Assets matching every criterion, in identifier order.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&Asset> {
        let found: Vec<&Asset> = self.assets().filter(|a| criteria.matches(a)).collect();
        tracing::debug!(
            criteria = ?criteria.field_matches(),
            matched = found.len(),
            "search"
        );
        found
    }

    /// Identifiers listed for resale, in listing order.
    pub fn marketplace(&self) -> &[AssetId] {
        &self.marketplace
    }

    pub fn marketplace_listings(&self) -> Vec<&Asset> {
        self.marketplace
            .iter()
            .filter_map(|id| self.assets.get(id))
            .collect()
    }

    /// Look for dormant stock before approving a purchase.
    ///
    /// Names compare case-insensitively; category must match exactly.
    pub fn check_procurement_prevention(
        &self,
        device_name: &str,
        category: DeviceCategory,
    ) -> ProcurementCheck<'_> {
        let wanted = device_name.to_lowercase();
        let matches: Vec<&Asset> = self
            .assets()
            .filter(|a| a.name().to_lowercase() == wanted && a.is_dormant() && a.category() == category)
            .collect();

        if matches.is_empty() {
            tracing::info!(device_name, category = %category, "procurement approved; no dormant stock");
        } else {
            tracing::warn!(
                device_name,
                category = %category,
                dormant = matches.len(),
                "procurement blocked; dormant stock available"
            );
        }

        ProcurementCheck {
            device_name: device_name.to_string(),
            category,
            matches,
        }
    }

    /// Group every asset by its current disposal strategy.
    pub fn generate_migration_report(&self) -> MigrationReport<'_> {
        let mut groups: BTreeMap<DisposalStrategy, Vec<&Asset>> = BTreeMap::new();
        for asset in self.assets() {
            groups.entry(asset.disposal_strategy()).or_default().push(asset);
        }
        MigrationReport { groups }
    }

    /// Snapshot of the current state stamped with the current time.
    pub fn export_snapshot(&self) -> InventorySnapshot {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, timestamp: DateTime<Utc>) -> InventorySnapshot {
        InventorySnapshot {
            assets: self
                .assets
                .values()
                .map(|a| (a.id_typed(), AssetRecord::from(a)))
                .collect(),
            marketplace: self.marketplace.clone(),
            timestamp,
        }
    }

    fn sync_marketplace(&mut self, id: AssetId, strategy: DisposalStrategy) {
        let listed = self.marketplace.contains(&id);
        match (strategy == DisposalStrategy::Marketplace, listed) {
            (true, false) => self.marketplace.push(id),
            (false, true) => self.marketplace.retain(|listed| *listed != id),
            _ => {}
        }
    }
}

/// Follow-up note for strategies that need someone to act.
fn announce_strategy(id: AssetId, strategy: DisposalStrategy) {
    match strategy {
        DisposalStrategy::Marketplace => {
            tracing::info!(asset_id = %id, "listed on marketplace for sale/exchange")
        }
        DisposalStrategy::StripComponents => {
            tracing::info!(asset_id = %id, "scheduled for component extraction")
        }
        DisposalStrategy::HazardousDisposal => {
            tracing::warn!(asset_id = %id, "hazardous: special disposal protocol required")
        }
        _ => {}
    }
}

/// Result of a procurement prevention check.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementCheck<'a> {
    device_name: String,
    category: DeviceCategory,
    matches: Vec<&'a Asset>,
}

impl<'a> ProcurementCheck<'a> {
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn category(&self) -> DeviceCategory {
        self.category
    }

    /// Dormant assets that make the purchase unnecessary.
    pub fn matches(&self) -> &[&'a Asset] {
        &self.matches
    }

    pub fn into_matches(self) -> Vec<&'a Asset> {
        self.matches
    }

    pub fn is_blocked(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn is_approved(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Assets grouped by disposal strategy. Strategies with no assets are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationReport<'a> {
    groups: BTreeMap<DisposalStrategy, Vec<&'a Asset>>,
}

impl<'a> MigrationReport<'a> {
    pub fn groups(&self) -> &BTreeMap<DisposalStrategy, Vec<&'a Asset>> {
        &self.groups
    }

    pub fn assets_for(&self, strategy: DisposalStrategy) -> &[&'a Asset] {
        self.groups.get(&strategy).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, strategy: DisposalStrategy) -> usize {
        self.assets_for(strategy).len()
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
