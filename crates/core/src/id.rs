//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Prefix used when rendering an [`AssetId`] without an explicit format.
pub const DEFAULT_ID_PREFIX: &str = "ASSET";

/// Minimum digit count of the numeric suffix of a rendered [`AssetId`].
pub const DEFAULT_ID_WIDTH: usize = 4;

/// Identifier of a campus asset.
///
/// Allocated sequentially by the inventory and never reused. Rendered as
/// `ASSET-0001`; the suffix grows past four digits once the counter does.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(u64);

impl AssetId {
    pub fn from_sequence(seq: u64) -> Self {
        Self(seq)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }

    /// Render with a custom prefix and zero-padded width.
    pub fn render(&self, prefix: &str, width: usize) -> String {
        format!("{prefix}-{:0width$}", self.0)
    }

    /// Parse `<prefix>-<digits>`, accepting any alphabetic prefix.
    pub fn parse_with_prefix(s: &str, prefix: &str) -> Result<Self, DomainError> {
        let (head, digits) = s
            .rsplit_once('-')
            .ok_or_else(|| DomainError::invalid_id(format!("AssetId: missing '-' in {s:?}")))?;
        if !head.eq_ignore_ascii_case(prefix) {
            return Err(DomainError::invalid_id(format!(
                "AssetId: expected prefix {prefix:?}, got {head:?}"
            )));
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_id(format!(
                "AssetId: non-numeric suffix in {s:?}"
            )));
        }
        let seq = digits
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("AssetId: {e}")))?;
        Ok(Self(seq))
    }
}

impl core::fmt::Display for AssetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.render(DEFAULT_ID_PREFIX, DEFAULT_ID_WIDTH))
    }
}

impl FromStr for AssetId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_prefix(s.trim(), DEFAULT_ID_PREFIX)
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_width_suffix() {
        assert_eq!(AssetId::from_sequence(1).to_string(), "ASSET-0001");
        assert_eq!(AssetId::from_sequence(42).to_string(), "ASSET-0042");
        assert_eq!(AssetId::from_sequence(12345).to_string(), "ASSET-12345");
    }

    #[test]
    fn custom_prefix_and_width() {
        let id = AssetId::from_sequence(7);
        assert_eq!(id.render("LAB", 6), "LAB-000007");
        assert_eq!(AssetId::parse_with_prefix("LAB-000007", "LAB").unwrap(), id);
    }

    #[test]
    fn parse_round_trips_display() {
        let id = AssetId::from_sequence(3);
        assert_eq!(id.to_string().parse::<AssetId>().unwrap(), id);
        assert_eq!(" asset-0003 ".parse::<AssetId>().unwrap(), id);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "ASSET", "ASSET-", "ASSET-12a", "ITEM-0001", "0001"] {
            match bad.parse::<AssetId>() {
                Err(DomainError::InvalidId(_)) => {}
                other => panic!("expected InvalidId for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_as_rendered_string() {
        let json = serde_json::to_string(&AssetId::from_sequence(5)).unwrap();
        assert_eq!(json, "\"ASSET-0005\"");
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sequence(), 5);
    }
}
