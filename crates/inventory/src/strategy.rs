//! Disposal strategy classification.
//!
//! A fixed decision table evaluated top to bottom; the first rule that
//! matches wins. Conditions overlap, so the order is part of the contract.
//! All thresholds are strict: a device exactly at a boundary falls through
//! to the next rule.

use serde::{Deserialize, Serialize};

use circuloop_core::DomainError;

use crate::asset::{DeviceCategory, normalize_key};

/// Devices younger than this (years) may be relocated.
pub const RELOCATE_MAX_AGE: f64 = 3.0;
/// Battery health (percent) a device must exceed to be relocated.
pub const RELOCATE_MIN_BATTERY: u8 = 70;
/// Devices younger than this (years) may be sold.
pub const MARKETPLACE_MAX_AGE: f64 = 5.0;
/// Battery health (percent) a device must exceed to be sold.
pub const MARKETPLACE_MIN_BATTERY: u8 = 40;
/// Non-refurbishable devices younger than this (years) are stripped for parts.
pub const STRIP_MAX_AGE: f64 = 7.0;

/// End-of-life handling path for a device.
///
/// Serialized as the human-readable label, not the variant name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DisposalStrategy {
    #[serde(rename = "Relocate to Permanent Campus")]
    Relocate,
    #[serde(rename = "Repurpose/Upcycle for Labs")]
    Repurpose,
    #[serde(rename = "Sell on Marketplace")]
    Marketplace,
    #[serde(rename = "Strip for Components")]
    StripComponents,
    #[serde(rename = "Responsible Recycling")]
    Recycle,
    #[serde(rename = "Hazardous Material Disposal")]
    HazardousDisposal,
}

impl DisposalStrategy {
    pub const ALL: [DisposalStrategy; 6] = [
        DisposalStrategy::Relocate,
        DisposalStrategy::Repurpose,
        DisposalStrategy::Marketplace,
        DisposalStrategy::StripComponents,
        DisposalStrategy::Recycle,
        DisposalStrategy::HazardousDisposal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DisposalStrategy::Relocate => "Relocate to Permanent Campus",
            DisposalStrategy::Repurpose => "Repurpose/Upcycle for Labs",
            DisposalStrategy::Marketplace => "Sell on Marketplace",
            DisposalStrategy::StripComponents => "Strip for Components",
            DisposalStrategy::Recycle => "Responsible Recycling",
            DisposalStrategy::HazardousDisposal => "Hazardous Material Disposal",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisposalStrategy::Relocate => "Relocate",
            DisposalStrategy::Repurpose => "Repurpose",
            DisposalStrategy::Marketplace => "Marketplace",
            DisposalStrategy::StripComponents => "StripComponents",
            DisposalStrategy::Recycle => "Recycle",
            DisposalStrategy::HazardousDisposal => "HazardousDisposal",
        }
    }
}

impl core::fmt::Display for DisposalStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for DisposalStrategy {
    type Err = DomainError;

    /// Accepts the label or the variant name, ignoring case and separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        DisposalStrategy::ALL
            .into_iter()
            .find(|d| normalize_key(d.label()) == key || normalize_key(d.name()) == key)
            .ok_or_else(|| DomainError::validation(format!("unknown disposal strategy: {s:?}")))
    }
}

/// Map a device's attributes to its disposal strategy.
///
/// Pure and total: every input combination yields exactly one strategy.
pub fn classify(
    is_hazardous: bool,
    age_years: f64,
    battery_health: u8,
    can_refurbish: bool,
    category: DeviceCategory,
) -> DisposalStrategy {
    if is_hazardous {
        return DisposalStrategy::HazardousDisposal;
    }

    if age_years < RELOCATE_MAX_AGE && battery_health > RELOCATE_MIN_BATTERY && can_refurbish {
        DisposalStrategy::Relocate
    } else if can_refurbish
        && age_years < MARKETPLACE_MAX_AGE
        && battery_health > MARKETPLACE_MIN_BATTERY
    {
        DisposalStrategy::Marketplace
    } else if category == DeviceCategory::LabEquipment && can_refurbish {
        DisposalStrategy::Repurpose
    } else if !can_refurbish && age_years < STRIP_MAX_AGE {
        DisposalStrategy::StripComponents
    } else {
        DisposalStrategy::Recycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use DeviceCategory::*;
    use DisposalStrategy::*;

    #[test]
    fn hazardous_dominates() {
        assert_eq!(classify(true, 0.5, 100, false, Consumable), HazardousDisposal);
        assert_eq!(classify(true, 1.0, 95, true, Laptop), HazardousDisposal);
    }

    #[test]
    fn relocate_requires_strict_bounds() {
        assert_eq!(classify(false, 2.99, 71, true, Laptop), Relocate);
        // Age exactly 3 falls to the marketplace rule.
        assert_eq!(classify(false, 3.0, 71, true, Laptop), Marketplace);
        // Battery exactly 70 falls to the marketplace rule.
        assert_eq!(classify(false, 1.0, 70, true, Laptop), Marketplace);
    }

    #[test]
    fn marketplace_requires_strict_bounds() {
        assert_eq!(classify(false, 4.99, 41, true, Laptop), Marketplace);
        assert_eq!(classify(false, 5.0, 41, true, Laptop), Recycle);
        assert_eq!(classify(false, 4.0, 40, true, Laptop), Recycle);
    }

    #[test]
    fn refurbishable_lab_equipment_is_repurposed() {
        assert_eq!(classify(false, 6.0, 20, true, LabEquipment), Repurpose);
        assert_eq!(classify(false, 4.0, 30, true, LabEquipment), Repurpose);
        // Good condition still prefers the earlier rules.
        assert_eq!(classify(false, 1.0, 90, true, LabEquipment), Relocate);
    }

    #[test]
    fn non_refurbishable_young_devices_are_stripped() {
        assert_eq!(classify(false, 4.0, 100, false, LabEquipment), StripComponents);
        assert_eq!(classify(false, 6.99, 0, false, Appliance), StripComponents);
        assert_eq!(classify(false, 7.0, 0, false, Appliance), Recycle);
    }

    #[test]
    fn everything_else_is_recycled() {
        assert_eq!(classify(false, 10.0, 100, true, Peripheral), Recycle);
        assert_eq!(classify(false, 12.0, 5, false, Laptop), Recycle);
    }

    #[test]
    fn labels_match_serialized_form() {
        for s in DisposalStrategy::ALL {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.label()));
        }
    }

    #[test]
    fn parses_label_or_name() {
        assert_eq!("Sell on Marketplace".parse::<DisposalStrategy>().unwrap(), Marketplace);
        assert_eq!("strip_components".parse::<DisposalStrategy>().unwrap(), StripComponents);
        assert_eq!("HazardousDisposal".parse::<DisposalStrategy>().unwrap(), HazardousDisposal);
        assert!("Landfill".parse::<DisposalStrategy>().is_err());
    }

    fn any_category() -> impl Strategy<Value = DeviceCategory> {
        prop::sample::select(DeviceCategory::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: hazardous devices are always routed to hazardous disposal.
        #[test]
        fn hazardous_always_wins(
            age in 0.0f64..50.0,
            battery in 0u8..=100,
            refurbish in any::<bool>(),
            category in any_category(),
        ) {
            prop_assert_eq!(classify(true, age, battery, refurbish, category), HazardousDisposal);
        }

        /// Property: classification is deterministic.
        #[test]
        fn classify_is_deterministic(
            hazardous in any::<bool>(),
            age in 0.0f64..50.0,
            battery in 0u8..=100,
            refurbish in any::<bool>(),
            category in any_category(),
        ) {
            let a = classify(hazardous, age, battery, refurbish, category);
            let b = classify(hazardous, age, battery, refurbish, category);
            prop_assert_eq!(a, b);
        }

        /// Property: non-hazardous devices never get the hazardous path, and
        /// non-refurbishable ones are never relocated, sold or repurposed.
        #[test]
        fn refurbish_gates_reuse_paths(
            age in 0.0f64..50.0,
            battery in 0u8..=100,
            category in any_category(),
        ) {
            let s = classify(false, age, battery, false, category);
            prop_assert!(matches!(s, StripComponents | Recycle));
        }
    }
}
