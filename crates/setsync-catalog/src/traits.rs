//! Catalog client trait
//!
//! The operations the sync engine consumes. Implementations talk to a real
//! catalog API; tests substitute a scripted double.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::ids::{CatalogId, ProductSetId, RetailerId};
use crate::payload::ProductSetPayload;

/// Create/read/update/delete operations on remote product sets.
///
/// Every call is synchronous from the caller's point of view and may fail
/// with a [`CatalogError`](crate::error::CatalogError); callers decide what
/// a failure means using its transient/permanent classification.
#[async_trait]
pub trait ProductSetOps: Send + Sync {
    /// Resolve the product set linked to `retailer`, if any.
    ///
    /// # Returns
    /// `Ok(Some(id))` when a set carries the retailer id, `Ok(None)` when
    /// the lookup definitively found nothing. A transport or API failure is
    /// an `Err` — never `Ok(None)`.
    async fn read(
        &self,
        catalog: &CatalogId,
        retailer: &RetailerId,
    ) -> CatalogResult<Option<ProductSetId>>;

    /// Create a new product set in `catalog`.
    ///
    /// # Returns
    /// The id minted by the remote side.
    async fn create(
        &self,
        catalog: &CatalogId,
        payload: &ProductSetPayload,
    ) -> CatalogResult<ProductSetId>;

    /// Replace the named set's definition wholesale. No diffing.
    async fn update(&self, set: &ProductSetId, payload: &ProductSetPayload) -> CatalogResult<()>;

    /// Delete the named set.
    ///
    /// `allow_live_deletion` forces removal even when the set is still
    /// referenced by live surfaces on the remote side.
    async fn delete(&self, set: &ProductSetId, allow_live_deletion: bool) -> CatalogResult<()>;
}
