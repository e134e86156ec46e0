//! Event handlers for taxonomy mutations.
//!
//! Outermost boundary for the real-time path: a taxonomy mutation must
//! never fail or roll back because sync failed, so every handler catches,
//! logs, and swallows.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::category::{Category, CategoryIdentity};
use crate::reconciler::{DeleteOutcome, Reconciler};

/// Handles category lifecycle notifications from the taxonomy store.
///
/// The host event bus invokes these methods directly; there is no callback
/// registry inside the engine.
pub struct CategoryEventHandler {
    reconciler: Arc<Reconciler>,
}

impl CategoryEventHandler {
    /// Create a new event handler.
    pub fn new(reconciler: Arc<Reconciler>) -> Self {
        Self { reconciler }
    }

    /// Handle a category creation.
    #[instrument(skip(self, category), fields(category_id = %category.id, name = %category.name))]
    pub async fn on_category_created(&self, category: &Category) {
        info!("Handling category created");
        self.upsert_and_absorb(category).await;
    }

    /// Handle a category update (including renames).
    #[instrument(skip(self, category), fields(category_id = %category.id, name = %category.name))]
    pub async fn on_category_updated(&self, category: &Category) {
        info!("Handling category updated");
        self.upsert_and_absorb(category).await;
    }

    /// Handle a category deletion.
    ///
    /// `identity` was captured before the store entry disappeared; the
    /// reconciler absorbs remote failures itself, so there is nothing to
    /// catch here beyond noting the outcome.
    #[instrument(skip(self, identity), fields(category_id = %identity.id, name = %identity.name))]
    pub async fn on_category_deleted(&self, identity: &CategoryIdentity) {
        info!("Handling category deleted");
        match self.reconciler.delete(identity).await {
            DeleteOutcome::Deleted(set) => info!(set_id = %set, "Remote set removed"),
            DeleteOutcome::NotLinked => info!("No remote set was linked"),
            DeleteOutcome::Failed => {
                error!("Remote delete failed; drift remains until the next full pass");
            }
        }
    }

    async fn upsert_and_absorb(&self, category: &Category) {
        if let Err(e) = self.reconciler.upsert(category).await {
            error!(
                error = %e,
                error_code = e.error_code(),
                retryable = e.is_retryable(),
                "Sync failed for category; mutation is not rolled back"
            );
        }
    }
}
