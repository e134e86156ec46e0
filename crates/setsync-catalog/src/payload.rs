//! Product set payload construction
//!
//! The wire representation of a product set, built fresh from local data on
//! every call. A payload is a pure value: building one performs no I/O.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ids::RetailerId;

/// Optional descriptive fields attached to a product set.
///
/// Each field is serialized only when present; empty strings are never
/// promoted into the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMetadata {
    /// Cover image shown for the set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    /// Free-text description of the set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Public URL of the category the set mirrors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl SetMetadata {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.cover_image_url.is_none() && self.description.is_none() && self.external_url.is_none()
    }
}

/// Full-replace payload for creating or updating a product set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSetPayload {
    /// Display name of the set.
    pub name: String,

    /// Serialized matching rule selecting the set's products.
    pub filter: String,

    /// Stable join key back to the local category.
    pub retailer_id: RetailerId,

    /// Optional descriptive fields.
    pub metadata: SetMetadata,
}

impl ProductSetPayload {
    /// Build a payload for a set named `name`, matching products whose
    /// product type contains the name (case-insensitive).
    pub fn new(name: impl Into<String>, retailer_id: RetailerId) -> Self {
        let name = name.into();
        let filter = product_type_filter(&name);
        Self {
            name,
            filter,
            retailer_id,
            metadata: SetMetadata::default(),
        }
    }

    /// Attach a description, ignoring empty input.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.metadata.description = Some(description);
        }
        self
    }

    /// Attach a cover image URL, ignoring empty input.
    #[must_use]
    pub fn with_cover_image_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.metadata.cover_image_url = Some(url);
        }
        self
    }

    /// Attach an external URL, ignoring empty input.
    #[must_use]
    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if !url.is_empty() {
            self.metadata.external_url = Some(url);
        }
        self
    }
}

/// Serialized rule matching products whose product type contains `name`,
/// case-insensitive.
fn product_type_filter(name: &str) -> String {
    json!({ "product_type": { "i_contains": name } }).to_string()
}
