//! Local category model
//!
//! Read-only view of a node in the consumer-facing taxonomy. The taxonomy
//! store owns these; the engine only derives payloads and join keys from
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use setsync_catalog::ids::RetailerId;
use setsync_catalog::payload::ProductSetPayload;

/// Numeric identifier of a category within the taxonomy store.
///
/// Display-facing and store-local. Never used as the remote join key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    /// Wrap a raw store identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Stable identity of a taxonomy node, assigned once at creation.
///
/// This is the value that becomes the remote retailer id. It must survive
/// renames, which is why the mutable display name and the store-local
/// numeric id are never used in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyInstanceId(Uuid);

impl TaxonomyInstanceId {
    /// Create a new random instance id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an instance id from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID value.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Derive the remote join key for this instance.
    pub fn retailer_id(&self) -> RetailerId {
        RetailerId::new(self.0.to_string())
    }
}

impl Default for TaxonomyInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaxonomyInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaxonomyInstanceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A local category as the taxonomy store exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-local identifier.
    pub id: CategoryId,

    /// Stable identity used as the remote join key.
    pub instance_id: TaxonomyInstanceId,

    /// Display name. Mutable; renames must not break remote linkage.
    pub name: String,

    /// Free-text description. May be empty.
    #[serde(default)]
    pub description: String,

    /// Public URL of the category page. May be empty.
    #[serde(default)]
    pub url: String,

    /// Thumbnail image URL, when one is set.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Category {
    /// The remote join key for this category.
    pub fn retailer_id(&self) -> RetailerId {
        self.instance_id.retailer_id()
    }

    /// Capture the identity that survives deletion of this category.
    pub fn identity(&self) -> CategoryIdentity {
        CategoryIdentity {
            id: self.id,
            instance_id: self.instance_id,
            name: self.name.clone(),
        }
    }

    /// Build the full-replace payload for this category.
    ///
    /// Pure: no I/O, no side effects. Empty descriptive fields are dropped
    /// rather than sent as empty strings.
    pub fn to_payload(&self) -> ProductSetPayload {
        ProductSetPayload::new(self.name.clone(), self.retailer_id())
            .with_description(self.description.clone())
            .with_cover_image_url(self.thumbnail_url.clone().unwrap_or_default())
            .with_external_url(self.url.clone())
    }
}

/// What remains of a category once the store has deleted it.
///
/// The event source captures this *before* the delete completes; the engine
/// never re-reads the store for a deleted node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryIdentity {
    /// Store-local identifier, for log context.
    pub id: CategoryId,

    /// Stable identity used as the remote join key.
    pub instance_id: TaxonomyInstanceId,

    /// Last known display name, for log context.
    pub name: String,
}

impl CategoryIdentity {
    /// The remote join key for the deleted category.
    pub fn retailer_id(&self) -> RetailerId {
        self.instance_id.retailer_id()
    }
}
