//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers the deterministic failures an inventory operation can report to its
/// caller. "Not found" is an ordinary outcome here, never a panic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-numeric age, battery above 100).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field name is not an updatable/searchable attribute of the entity.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_attribute(name: impl Into<String>) -> Self {
        Self::InvalidAttribute(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
