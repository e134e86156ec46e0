//! Injected collaborator seams
//!
//! The engine owns no storage and no configuration. Everything it needs
//! from the host is behind one of these traits.

use async_trait::async_trait;

use setsync_catalog::ids::CatalogId;

use crate::category::Category;
use crate::error::SyncResult;

/// Read access to the local taxonomy, for the full-sync enumeration.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories currently in the taxonomy. Order is not guaranteed;
    /// the caller sorts for reproducibility.
    async fn list_categories(&self) -> SyncResult<Vec<Category>>;
}

/// Resolves which remote catalog this installation syncs into.
#[async_trait]
pub trait CatalogIdentityProvider: Send + Sync {
    /// The configured catalog id.
    ///
    /// Returns [`SyncError::MissingCatalog`](crate::error::SyncError) when
    /// the installation has not been connected to a catalog yet.
    async fn catalog_id(&self) -> SyncResult<CatalogId>;
}

/// Identity provider for a fixed, already-known catalog.
pub struct StaticCatalog(CatalogId);

impl StaticCatalog {
    /// Provider that always answers with `catalog`.
    pub fn new(catalog: CatalogId) -> Self {
        Self(catalog)
    }
}

#[async_trait]
impl CatalogIdentityProvider for StaticCatalog {
    async fn catalog_id(&self) -> SyncResult<CatalogId> {
        Ok(self.0.clone())
    }
}
