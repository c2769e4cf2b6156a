use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use circuloop_core::{AssetId, DomainError, DomainResult};

use crate::strategy::{DisposalStrategy, classify};

/// Status every asset starts in: unused, sitting in storage.
pub const STATUS_DORMANT: &str = "Dormant";

/// Status that stamps `last_used` whenever it is set.
pub const STATUS_IN_USE: &str = "In Use";

/// Location every asset starts in.
pub const DEFAULT_LOCATION: &str = "Storage";

/// Categories of electronic devices on campus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeviceCategory {
    Laptop,
    #[serde(rename = "Lab Equipment")]
    LabEquipment,
    Consumable,
    Appliance,
    Peripheral,
}

impl DeviceCategory {
    pub const ALL: [DeviceCategory; 5] = [
        DeviceCategory::Laptop,
        DeviceCategory::LabEquipment,
        DeviceCategory::Consumable,
        DeviceCategory::Appliance,
        DeviceCategory::Peripheral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Laptop => "Laptop",
            DeviceCategory::LabEquipment => "Lab Equipment",
            DeviceCategory::Consumable => "Consumable",
            DeviceCategory::Appliance => "Appliance",
            DeviceCategory::Peripheral => "Peripheral",
        }
    }
}

impl core::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for DeviceCategory {
    type Err = DomainError;

    /// Accepts the display form ("Lab Equipment") or the symbolic one
    /// ("LabEquipment", "lab_equipment"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        DeviceCategory::ALL
            .into_iter()
            .find(|c| normalize_key(c.as_str()) == key)
            .ok_or_else(|| DomainError::validation(format!("unknown device category: {s:?}")))
    }
}

/// Lowercase with spaces, underscores, dashes and slashes removed.
pub(crate) fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Physical attributes supplied when registering a device.
///
/// These are the inputs of the disposal classifier. Defaults for the optional
/// ones follow intake practice: full battery, refurbishable, not hazardous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAttributes {
    pub name: String,
    pub model: String,
    pub category: DeviceCategory,
    pub age_years: f64,
    pub battery_health: u8,
    pub can_refurbish: bool,
    pub is_hazardous: bool,
}

impl AssetAttributes {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        category: DeviceCategory,
        age_years: f64,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            category,
            age_years,
            battery_health: 100,
            can_refurbish: true,
            is_hazardous: false,
        }
    }

    pub fn with_battery_health(mut self, battery_health: u8) -> Self {
        self.battery_health = battery_health;
        self
    }

    pub fn with_can_refurbish(mut self, can_refurbish: bool) -> Self {
        self.can_refurbish = can_refurbish;
        self
    }

    pub fn with_hazardous(mut self, is_hazardous: bool) -> Self {
        self.is_hazardous = is_hazardous;
        self
    }

    /// Run the classifier over these attributes.
    pub fn classify(&self) -> DisposalStrategy {
        classify(
            self.is_hazardous,
            self.age_years,
            self.battery_health,
            self.can_refurbish,
            self.category,
        )
    }
}

/// Every attribute of an [`Asset`] addressable by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetField {
    AssetId,
    Name,
    Model,
    Category,
    AgeYears,
    BatteryHealth,
    CanRefurbish,
    IsHazardous,
    Status,
    Location,
    DisposalStrategy,
}

impl AssetField {
    pub const ALL: [AssetField; 11] = [
        AssetField::AssetId,
        AssetField::Name,
        AssetField::Model,
        AssetField::Category,
        AssetField::AgeYears,
        AssetField::BatteryHealth,
        AssetField::CanRefurbish,
        AssetField::IsHazardous,
        AssetField::Status,
        AssetField::Location,
        AssetField::DisposalStrategy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetField::AssetId => "asset_id",
            AssetField::Name => "name",
            AssetField::Model => "model",
            AssetField::Category => "category",
            AssetField::AgeYears => "age_years",
            AssetField::BatteryHealth => "battery_health",
            AssetField::CanRefurbish => "can_refurbish",
            AssetField::IsHazardous => "is_hazardous",
            AssetField::Status => "status",
            AssetField::Location => "location",
            AssetField::DisposalStrategy => "disposal_strategy",
        }
    }

    /// Identity and the derived strategy cannot be written by callers.
    pub fn is_updatable(&self) -> bool {
        !matches!(self, AssetField::AssetId | AssetField::DisposalStrategy)
    }
}

impl core::fmt::Display for AssetField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for AssetField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        AssetField::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| DomainError::invalid_attribute(key))
    }
}

/// A single change to an updatable attribute.
///
/// The set of variants is the complete set of fields a caller may write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum AssetUpdate {
    Name(String),
    Model(String),
    Category(DeviceCategory),
    AgeYears(f64),
    BatteryHealth(u8),
    CanRefurbish(bool),
    IsHazardous(bool),
    Status(String),
    Location(String),
}

impl AssetUpdate {
    pub fn field(&self) -> AssetField {
        match self {
            AssetUpdate::Name(_) => AssetField::Name,
            AssetUpdate::Model(_) => AssetField::Model,
            AssetUpdate::Category(_) => AssetField::Category,
            AssetUpdate::AgeYears(_) => AssetField::AgeYears,
            AssetUpdate::BatteryHealth(_) => AssetField::BatteryHealth,
            AssetUpdate::CanRefurbish(_) => AssetField::CanRefurbish,
            AssetUpdate::IsHazardous(_) => AssetField::IsHazardous,
            AssetUpdate::Status(_) => AssetField::Status,
            AssetUpdate::Location(_) => AssetField::Location,
        }
    }

    /// Parse a string-keyed change as typed at a form or command line.
    ///
    /// Unknown or read-only field names yield `InvalidAttribute`; values that
    /// do not fit the field yield `Validation`.
    pub fn parse(field: &str, value: &str) -> DomainResult<Self> {
        let field: AssetField = field.parse()?;
        let update = match field {
            AssetField::Name => AssetUpdate::Name(value.to_string()),
            AssetField::Model => AssetUpdate::Model(value.to_string()),
            AssetField::Category => AssetUpdate::Category(value.parse()?),
            AssetField::AgeYears => AssetUpdate::AgeYears(parse_age(value)?),
            AssetField::BatteryHealth => AssetUpdate::BatteryHealth(parse_battery(value)?),
            AssetField::CanRefurbish => AssetUpdate::CanRefurbish(parse_flag(value)?),
            AssetField::IsHazardous => AssetUpdate::IsHazardous(parse_flag(value)?),
            AssetField::Status => AssetUpdate::Status(value.to_string()),
            AssetField::Location => AssetUpdate::Location(value.to_string()),
            AssetField::AssetId | AssetField::DisposalStrategy => {
                return Err(DomainError::invalid_attribute(format!(
                    "{field} is not updatable"
                )));
            }
        };
        Ok(update)
    }
}

pub(crate) fn parse_age(value: &str) -> DomainResult<f64> {
    let age: f64 = value
        .trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("age_years must be a number, got {value:?}")))?;
    if !age.is_finite() || age < 0.0 {
        return Err(DomainError::validation(format!(
            "age_years must be a non-negative number, got {value:?}"
        )));
    }
    Ok(age)
}

pub(crate) fn parse_battery(value: &str) -> DomainResult<u8> {
    match value.trim().parse::<u8>() {
        Ok(b) if b <= 100 => Ok(b),
        _ => Err(DomainError::validation(format!(
            "battery_health must be an integer in 0..=100, got {value:?}"
        ))),
    }
}

pub(crate) fn parse_flag(value: &str) -> DomainResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(DomainError::validation(format!("expected yes/no, got {value:?}"))),
    }
}

/// A single tracked device.
///
/// Only the inventory creates assets. The disposal strategy is recomputed by
/// every mutation, so it always reflects the current attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    id: AssetId,
    attributes: AssetAttributes,
    status: String,
    location: String,
    last_used: Option<DateTime<Utc>>,
    disposal_strategy: DisposalStrategy,
}

impl Asset {
    pub(crate) fn new(id: AssetId, attributes: AssetAttributes) -> Self {
        let disposal_strategy = attributes.classify();
        Self {
            id,
            attributes,
            status: STATUS_DORMANT.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            last_used: None,
            disposal_strategy,
        }
    }

    pub fn id_typed(&self) -> AssetId {
        self.id
    }

    pub fn attributes(&self) -> &AssetAttributes {
        &self.attributes
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    pub fn model(&self) -> &str {
        &self.attributes.model
    }

    pub fn category(&self) -> DeviceCategory {
        self.attributes.category
    }

    pub fn age_years(&self) -> f64 {
        self.attributes.age_years
    }

    pub fn battery_health(&self) -> u8 {
        self.attributes.battery_health
    }

    pub fn can_refurbish(&self) -> bool {
        self.attributes.can_refurbish
    }

    pub fn is_hazardous(&self) -> bool {
        self.attributes.is_hazardous
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        self.last_used
    }

    pub fn disposal_strategy(&self) -> DisposalStrategy {
        self.disposal_strategy
    }

    pub fn is_dormant(&self) -> bool {
        self.status == STATUS_DORMANT
    }

    /// Set the lifecycle status. Moving to "In Use" stamps `last_used`.
    pub(crate) fn set_status(&mut self, status: String, at: DateTime<Utc>) {
        if status == STATUS_IN_USE {
            self.last_used = Some(at);
        }
        self.status = status;
    }

    /// Write one field without reclassifying; callers batch changes and then
    /// call [`Asset::reclassify`].
    pub(crate) fn apply(&mut self, update: AssetUpdate, at: DateTime<Utc>) {
        match update {
            AssetUpdate::Name(v) => self.attributes.name = v,
            AssetUpdate::Model(v) => self.attributes.model = v,
            AssetUpdate::Category(v) => self.attributes.category = v,
            AssetUpdate::AgeYears(v) => self.attributes.age_years = v,
            AssetUpdate::BatteryHealth(v) => self.attributes.battery_health = v,
            AssetUpdate::CanRefurbish(v) => self.attributes.can_refurbish = v,
            AssetUpdate::IsHazardous(v) => self.attributes.is_hazardous = v,
            AssetUpdate::Status(v) => self.set_status(v, at),
            AssetUpdate::Location(v) => self.location = v,
        }
    }

    pub(crate) fn reclassify(&mut self) -> DisposalStrategy {
        self.disposal_strategy = self.attributes.classify();
        self.disposal_strategy
    }
}

impl core::fmt::Display for Asset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ID: {} | {} ({}) | Category: {} | Age: {:?}yr | Battery: {}% | Status: {} | Strategy: {}",
            self.id,
            self.attributes.name,
            self.attributes.model,
            self.attributes.category,
            self.attributes.age_years,
            self.attributes.battery_health,
            self.status,
            self.disposal_strategy,
        )
    }
}
