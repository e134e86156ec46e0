//! Per-category reconciliation
//!
//! One code path serves both the event handlers and the full-sync pass:
//! resolve current remote linkage, then apply the minimal corrective write.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use setsync_catalog::error::CatalogError;
use setsync_catalog::ids::{CatalogId, ProductSetId};
use setsync_catalog::payload::ProductSetPayload;
use setsync_catalog::traits::ProductSetOps;

use crate::category::{Category, CategoryIdentity};
use crate::error::{SyncError, SyncResult, WriteOperation};
use crate::traits::CatalogIdentityProvider;

/// What an upsert did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No set carried the retailer id; a new one was created.
    Created(ProductSetId),
    /// An existing set was replaced in full.
    Updated(ProductSetId),
}

impl UpsertOutcome {
    /// The remote set id the category is now linked to.
    pub fn set_id(&self) -> &ProductSetId {
        match self {
            UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) => id,
        }
    }
}

/// What a delete did. Failures are absorbed, so this is the only signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No remote set was linked; nothing to delete.
    NotLinked,
    /// The linked set was deleted.
    Deleted(ProductSetId),
    /// Lookup or delete failed; drift remains until the next full pass.
    Failed,
}

/// Applies the minimal corrective action for one category.
///
/// Read-before-write is the entire duplicate-prevention mechanism: the
/// remote side exposes no idempotency key, so `create` is only issued after
/// a successful lookup returned nothing. Concurrent upserts for the same
/// retailer id are not serialized here; a lost update self-corrects on the
/// next pass.
pub struct Reconciler {
    client: Arc<dyn ProductSetOps>,
    identity: Arc<dyn CatalogIdentityProvider>,
}

impl Reconciler {
    /// Create a reconciler over the given client and catalog identity.
    pub fn new(client: Arc<dyn ProductSetOps>, identity: Arc<dyn CatalogIdentityProvider>) -> Self {
        Self { client, identity }
    }

    /// Bring the remote set for `category` in line with its current state.
    ///
    /// A failed lookup is returned as [`SyncError::Lookup`], never treated
    /// as not-found. Write failures are logged with the attempted payload
    /// and returned; the caller decides whether the batch continues.
    #[instrument(skip(self, category), fields(category_id = %category.id, retailer_id = %category.retailer_id()))]
    pub async fn upsert(&self, category: &Category) -> SyncResult<UpsertOutcome> {
        let catalog = self.identity.catalog_id().await?;
        let retailer = category.retailer_id();

        let existing = self
            .client
            .read(&catalog, &retailer)
            .await
            .map_err(SyncError::lookup)?;

        let payload = category.to_payload();

        match existing {
            None => {
                let set = self
                    .client
                    .create(&catalog, &payload)
                    .await
                    .map_err(|e| log_write_failure(&catalog, WriteOperation::Create, &payload, e))?;
                info!(set_id = %set, "Created product set");
                Ok(UpsertOutcome::Created(set))
            }
            Some(set) => {
                self.client
                    .update(&set, &payload)
                    .await
                    .map_err(|e| log_write_failure(&catalog, WriteOperation::Update, &payload, e))?;
                info!(set_id = %set, "Updated product set");
                Ok(UpsertOutcome::Updated(set))
            }
        }
    }

    /// Remove the remote set for a category the store has already deleted.
    ///
    /// The local delete has happened and cannot be compensated, so every
    /// failure here is logged and absorbed rather than raised.
    #[instrument(skip(self, identity), fields(category_id = %identity.id, retailer_id = %identity.retailer_id()))]
    pub async fn delete(&self, identity: &CategoryIdentity) -> DeleteOutcome {
        let catalog = match self.identity.catalog_id().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, error_code = e.error_code(), "Skipping remote delete");
                return DeleteOutcome::Failed;
            }
        };

        let retailer = identity.retailer_id();

        let existing = match self.client.read(&catalog, &retailer).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!(
                    error = %e,
                    error_code = e.error_code(),
                    "Linkage lookup failed during delete"
                );
                return DeleteOutcome::Failed;
            }
        };

        let Some(set) = existing else {
            debug!("No remote set linked, nothing to delete");
            return DeleteOutcome::NotLinked;
        };

        match self.client.delete(&set, true).await {
            Ok(()) => {
                info!(set_id = %set, "Deleted product set");
                DeleteOutcome::Deleted(set)
            }
            Err(e) => {
                warn!(
                    set_id = %set,
                    error = %e,
                    error_code = e.error_code(),
                    "Failed to delete product set"
                );
                DeleteOutcome::Failed
            }
        }
    }
}

fn log_write_failure(
    catalog: &CatalogId,
    operation: WriteOperation,
    payload: &ProductSetPayload,
    source: CatalogError,
) -> SyncError {
    warn!(
        catalog_id = %catalog,
        operation = %operation,
        error = %source,
        error_code = source.error_code(),
        payload = ?payload,
        "Remote write failed"
    );
    SyncError::write(operation, source)
}
