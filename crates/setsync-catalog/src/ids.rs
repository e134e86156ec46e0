//! Catalog identifier types
//!
//! Newtype wrappers for the string identifiers the remote catalog API
//! hands out and consumes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a remote catalog (the container all product sets live in).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    /// Create a catalog id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CatalogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a product set inside a remote catalog.
///
/// Opaque — minted by the remote side on create, never derived locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSetId(String);

impl ProductSetId {
    /// Create a product set id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductSetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductSetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The stable join key between a local category and its remote product set.
///
/// Survives renames of the category; the remote side stores it verbatim on
/// the set and the engine resolves linkage by querying on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetailerId(String);

impl RetailerId {
    /// Create a retailer id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RetailerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RetailerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RetailerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
