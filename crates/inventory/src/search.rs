//! Exact-match search criteria over asset fields.

use circuloop_core::{AssetId, DomainError, DomainResult};

use crate::asset::{Asset, AssetField, DeviceCategory, parse_age, parse_battery, parse_flag};
use crate::strategy::DisposalStrategy;

/// One field/value pair an asset must equal to match.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMatch {
    AssetId(AssetId),
    Name(String),
    Model(String),
    Category(DeviceCategory),
    AgeYears(f64),
    BatteryHealth(u8),
    CanRefurbish(bool),
    IsHazardous(bool),
    Status(String),
    Location(String),
    DisposalStrategy(DisposalStrategy),
    /// A field the asset does not have. Never matches.
    Unrecognized(String),
}

impl FieldMatch {
    pub fn matches(&self, asset: &Asset) -> bool {
        match self {
            FieldMatch::AssetId(id) => asset.id_typed() == *id,
            FieldMatch::Name(v) => asset.name() == v,
            FieldMatch::Model(v) => asset.model() == v,
            FieldMatch::Category(v) => asset.category() == *v,
            FieldMatch::AgeYears(v) => asset.age_years() == *v,
            FieldMatch::BatteryHealth(v) => asset.battery_health() == *v,
            FieldMatch::CanRefurbish(v) => asset.can_refurbish() == *v,
            FieldMatch::IsHazardous(v) => asset.is_hazardous() == *v,
            FieldMatch::Status(v) => asset.status() == v,
            FieldMatch::Location(v) => asset.location() == v,
            FieldMatch::DisposalStrategy(v) => asset.disposal_strategy() == *v,
            FieldMatch::Unrecognized(_) => false,
        }
    }

    /// Build a matcher from a string-keyed pair.
    ///
    /// Unknown field names become [`FieldMatch::Unrecognized`]; a value that
    /// cannot belong to a known field is a validation error.
    pub fn parse(field: &str, value: &str) -> DomainResult<Self> {
        let field = match field.parse::<AssetField>() {
            Ok(f) => f,
            Err(DomainError::InvalidAttribute(name)) => return Ok(FieldMatch::Unrecognized(name)),
            Err(e) => return Err(e),
        };
        let m = match field {
            AssetField::AssetId => FieldMatch::AssetId(value.parse()?),
            AssetField::Name => FieldMatch::Name(value.to_string()),
            AssetField::Model => FieldMatch::Model(value.to_string()),
            AssetField::Category => FieldMatch::Category(value.parse()?),
            AssetField::AgeYears => FieldMatch::AgeYears(parse_age(value)?),
            AssetField::BatteryHealth => FieldMatch::BatteryHealth(parse_battery(value)?),
            AssetField::CanRefurbish => FieldMatch::CanRefurbish(parse_flag(value)?),
            AssetField::IsHazardous => FieldMatch::IsHazardous(parse_flag(value)?),
            AssetField::Status => FieldMatch::Status(value.to_string()),
            AssetField::Location => FieldMatch::Location(value.to_string()),
            AssetField::DisposalStrategy => FieldMatch::DisposalStrategy(value.parse()?),
        };
        Ok(m)
    }
}

/// Conjunction of field matches. Empty criteria match every asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    matches: Vec<FieldMatch>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse string-keyed pairs, e.g. from a search form.
    pub fn from_pairs<'a, I>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let matches = pairs
            .into_iter()
            .map(|(field, value)| FieldMatch::parse(field, value))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { matches })
    }

    pub fn with(mut self, m: FieldMatch) -> Self {
        self.matches.push(m);
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.with(FieldMatch::Name(name.into()))
    }

    pub fn status(self, status: impl Into<String>) -> Self {
        self.with(FieldMatch::Status(status.into()))
    }

    pub fn category(self, category: DeviceCategory) -> Self {
        self.with(FieldMatch::Category(category))
    }

    pub fn strategy(self, strategy: DisposalStrategy) -> Self {
        self.with(FieldMatch::DisposalStrategy(strategy))
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn field_matches(&self) -> &[FieldMatch] {
        &self.matches
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        self.matches.iter().all(|m| m.matches(asset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_parses_to_unrecognized() {
        let m = FieldMatch::parse("colour", "red").unwrap();
        assert_eq!(m, FieldMatch::Unrecognized("colour".to_string()));
    }

    #[test]
    fn known_field_with_bad_value_is_rejected() {
        assert!(matches!(
            FieldMatch::parse("battery_health", "lots"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            FieldMatch::parse("asset_id", "nope"),
            Err(DomainError::InvalidId(_))
        ));
    }

    #[test]
    fn from_pairs_builds_conjunction() {
        let criteria =
            SearchCriteria::from_pairs([("name", "Laptop"), ("status", "Dormant")]).unwrap();
        assert_eq!(
            criteria,
            SearchCriteria::new().name("Laptop").status("Dormant")
        );
        assert!(SearchCriteria::new().is_empty());
    }

    #[test]
    fn strategy_criterion_accepts_label() {
        let m = FieldMatch::parse("disposal_strategy", "Sell on Marketplace").unwrap();
        assert_eq!(m, FieldMatch::DisposalStrategy(DisposalStrategy::Marketplace));
    }
}
