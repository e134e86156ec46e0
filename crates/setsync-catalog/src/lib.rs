//! # Catalog Client Framework
//!
//! Core abstractions for talking to a remote commerce catalog's product
//! sets. The sync engine consumes these types; concrete transports (see
//! `setsync-catalog-rest`) implement them.
//!
//! ## Crate Organization
//!
//! - [`ids`] - Type-safe identifiers (`CatalogId`, `ProductSetId`, `RetailerId`)
//! - [`error`] - Error types with transient/permanent classification
//! - [`payload`] - Product set payload construction
//! - [`traits`] - The [`ProductSetOps`](traits::ProductSetOps) client trait
//!
//! ## Example
//!
//! ```ignore
//! use setsync_catalog::prelude::*;
//!
//! let payload = ProductSetPayload::new("Shoes", RetailerId::new("stable-key"))
//!     .with_description("All footwear");
//!
//! match client.read(&catalog, &payload.retailer_id).await? {
//!     Some(set) => client.update(&set, &payload).await?,
//!     None => {
//!         client.create(&catalog, &payload).await?;
//!     }
//! }
//! ```

pub mod error;
pub mod ids;
pub mod payload;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CatalogResult};
    pub use crate::ids::{CatalogId, ProductSetId, RetailerId};
    pub use crate::payload::{ProductSetPayload, SetMetadata};
    pub use crate::traits::ProductSetOps;
}

// Re-export async_trait for client implementors
pub use async_trait::async_trait;
